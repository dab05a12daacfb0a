pub mod ikdc;
pub mod koos;
pub mod lysholm;
pub mod womac;
