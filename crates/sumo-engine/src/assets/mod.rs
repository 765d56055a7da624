pub mod skin;
