pub mod branding;
