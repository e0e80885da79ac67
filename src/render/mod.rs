pub mod html;
pub mod pages;
