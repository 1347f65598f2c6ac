use super::*;
use crate::cli::InitArgs;

#[test]
fn rejects_traversal_and_hidden_names() {
    for bad in ["a/b", "a\\b", "..", "../up", ".hidden", "-flagish"] {
        let args = InitArgs {
            name: bad.to_string(),
        };
        assert!(execute(&args).is_err(), "should reject {bad:?}");
    }
}
