pub mod elgamal;
