pub mod index;
pub mod link_header;
pub mod pagination;
