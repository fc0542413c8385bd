pub mod naming;

pub use naming::{font_name_from_uri, report_path};
