pub mod annotations;
pub mod labels;
