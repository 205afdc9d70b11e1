use super::*;

#[test]
fn test_validation_functions() {
    // Key length validation
    assert!(validate::key_length("AES-128", 16, 16).is_ok());
    let err = validate::key_length("AES-128", 24, 16).unwrap_err();

    match err {
        Error::InvalidKeyLength { context, actual } => {
            assert_eq!(context, "AES-128");
            assert_eq!(actual, 24);
        }
        _ => panic!("Expected InvalidKeyLength error"),
    }

    // Length validation
    assert!(validate::length("block", 16, 16).is_ok());
    let err = validate::length("block", 8, 16).unwrap_err();

    match err {
        Error::Length {
            context,
            expected,
            actual,
        } => {
            assert_eq!(context, "block");
            assert_eq!(expected, 16);
            assert_eq!(actual, 8);
        }
        _ => panic!("Expected Length error"),
    }

    assert!(validate::min_length("input", 32, 16).is_ok());
    assert!(validate::min_length("input", 8, 16).is_err());

    assert!(validate::block_multiple("buffer", 32, 16).is_ok());
    let err = validate::block_multiple("buffer", 20, 16).unwrap_err();
    match err {
        Error::Length { expected, actual, .. } => {
            assert_eq!(expected, 32);
            assert_eq!(actual, 20);
        }
        _ => panic!("Expected Length error"),
    }
}

#[test]
fn test_error_display() {
    let err = Error::InvalidKeyLength {
        context: "AES-192",
        actual: 17,
    };
    assert_eq!(err.to_string(), "Invalid key length for AES-192: 17 bytes");

    let err = Error::KeyNotSet {
        operation: "decrypt_n",
    };
    assert_eq!(err.to_string(), "Key not set before decrypt_n");

    let err = Error::Length {
        context: "AES block",
        expected: 16,
        actual: 8,
    };
    assert_eq!(err.to_string(), "Invalid length for AES block: expected 16, got 8");
}
