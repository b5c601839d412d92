/// Option Classifier: tags raw call elements as array data or option fragments.
pub mod classify;
