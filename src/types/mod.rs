pub mod artifact;
pub mod track;
