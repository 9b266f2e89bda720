pub mod catalog;
pub mod collation;
pub mod hours;
pub mod identity;
pub mod listing;
pub mod pagination;
pub mod pricing;
pub mod refine;
pub mod window;
