pub mod a001_faq;
pub mod a002_package;
pub mod a003_text;
