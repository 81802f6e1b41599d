pub mod neural_map;
