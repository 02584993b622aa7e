pub mod synthetic_spine;
