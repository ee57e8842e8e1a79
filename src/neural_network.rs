/// Module that contains the ReLU and softmax activation functions
pub mod activation;
/// Module that contains the categorical cross-entropy loss function
pub mod loss;
/// Module that contains the feedforward network implementation
pub mod network;

pub use activation::*;
pub use loss::*;
pub use network::*;
