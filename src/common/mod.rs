// Common constants shared by the solar and timer modules
pub mod constants;
