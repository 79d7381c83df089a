pub mod segmented_elgamal;
