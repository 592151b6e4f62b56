use gap_derive::gap_error;

#[gap_error]
pub enum PluginError {
    #[error("Invalid plugin: {message}")]
    Invalid { message: String },
}

fn main() {
    let err = PluginError::Invalid { message: "no entry".to_owned() };
    assert_eq!(err.variant_name(), "Invalid");
    assert_eq!(err.to_string(), "Invalid plugin: no entry");
}
