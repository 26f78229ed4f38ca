use app_resilience::capability::{
    self, constant_time_equals, digests_match, fill_random, generate_salt, secure_random_bytes,
    BinaryBuffer, CapabilityError, CapabilityProvider, ConstrainedProvider, HostProvider,
    NativeProvider,
};

#[test]
fn test_install_is_idempotent() {
    let active = capability::provider().name();
    assert_eq!(active, HostProvider::default().name());

    assert!(!capability::install(ConstrainedProvider::new()));
    assert!(!capability::install(NativeProvider));
    assert!(!capability::install_host_default());
    assert_eq!(capability::provider().name(), active);
}

#[test]
fn test_random_bytes_through_installed_provider() {
    let a = secure_random_bytes(32).unwrap();
    let b = secure_random_bytes(32).unwrap();
    assert_eq!(a.len(), 32);
    assert_ne!(a, b);

    let mut buffer = vec![0u8; 16];
    fill_random(&mut buffer, 0, 16).unwrap();
    assert!(buffer.iter().any(|&b| b != 0));
    assert!(matches!(
        fill_random(&mut buffer, 10, 7),
        Err(CapabilityError::OutOfRange { .. })
    ));
}

#[test]
fn test_constant_time_equals() {
    assert!(constant_time_equals(b"", b""));
    assert!(constant_time_equals(b"secret", b"secret"));
    assert!(!constant_time_equals(b"secret", b"secreT"));
    assert!(!constant_time_equals(b"secret", b"secret!"));
}

#[test]
fn test_unsupported_operations_fail_loudly() {
    let err = capability::digest("sha256", b"data").unwrap_err();
    assert!(err.to_string().contains("unsupported"));
    assert!(matches!(
        capability::encrypt("aes-256-gcm", b"key", b"data"),
        Err(CapabilityError::Unsupported { .. })
    ));
    assert!(matches!(
        capability::generate_key_pair("rsa"),
        Err(CapabilityError::Unsupported { .. })
    ));
}

#[test]
fn test_salt_consumer() {
    let salt = generate_salt(12).unwrap();
    assert_eq!(salt.len(), 29);
    assert!(salt.starts_with("$2b$12$"));
    assert!(digests_match(&salt, salt.as_str()));
}

#[test]
fn test_binary_buffer_views() {
    let mut buffer = BinaryBuffer::from(vec![1u8, 2, 3]);
    buffer[0] = 9;
    assert_eq!(buffer.as_bytes(), &[9, 2, 3]);
    assert_eq!(Vec::<u8>::from(buffer), vec![9, 2, 3]);
}
