pub mod uno;
