pub use crate::dataset::iris::load_iris;
pub use crate::error::ModelError;
pub use crate::metric::accuracy;
pub use crate::neural_network::activation::{relu, relu_derivative, softmax};
pub use crate::neural_network::loss::categorical_cross_entropy;
pub use crate::neural_network::network::{ForwardPass, Gradients, NetworkWeights, NeuralNetwork};
pub use crate::utility::label_encoding::{
    to_categorical, to_categorical_with_mapping, to_sparse_categorical,
};
pub use crate::utility::train_test_split::train_test_split;
