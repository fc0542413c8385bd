//! Font catalog, alias tables, and query resolution

pub mod alias;
pub mod catalog;
pub mod resolve;
pub mod weight;

pub use alias::{apply_family_alias, TYPEFACE_ALIAS_MAP};
pub use catalog::{file_path_from_uri, is_valid_font_file, FontCatalog};
pub use resolve::{pascal_case_to_array, resolve};
pub use weight::{is_equal_weight, weight_from_token, WEIGHT_ALIAS_MAP};
