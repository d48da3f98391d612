pub mod doubles;
pub mod prepare_env;
