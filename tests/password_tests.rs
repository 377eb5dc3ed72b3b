//! Password hashing unit tests
//!
//! Covers the salt:digest record contract and the fail-closed verify path

use staff_service::auth::password::PasswordHasher;

fn create_hasher() -> PasswordHasher {
    PasswordHasher::new("integration_test_pepper!")
}

#[test]
fn test_password_hash_and_verify() {
    let hasher = create_hasher();
    let password = "TestPassword123!";

    let record = hasher.hash(password);

    // Record is salt:digest, both base64
    assert_eq!(record.split(':').count(), 2);

    assert!(hasher.verify(password, &record));
}

#[test]
fn test_password_verify_with_wrong_password() {
    let hasher = create_hasher();
    let record = hasher.hash("TestPassword123!");

    assert!(!hasher.verify("WrongPassword123!", &record));
}

#[test]
fn test_password_hash_different_each_time() {
    let hasher = create_hasher();
    let password = "TestPassword123!";

    let record1 = hasher.hash(password);
    let record2 = hasher.hash(password);

    // Fresh salt per call, so records never repeat
    assert_ne!(record1, record2);

    assert!(hasher.verify(password, &record1));
    assert!(hasher.verify(password, &record2));
}

#[test]
fn test_password_hash_empty_string() {
    let hasher = create_hasher();
    let record = hasher.hash("");

    assert!(hasher.verify("", &record));
    assert!(!hasher.verify("password", &record));
}

#[test]
fn test_password_hash_unicode() {
    let hasher = create_hasher();
    let password = "pässwörd-Test123!🔒";

    let record = hasher.hash(password);

    assert!(hasher.verify(password, &record));
    assert!(!hasher.verify("pässwörd-Test123!", &record));
}

#[test]
fn test_password_hash_long_password() {
    let hasher = create_hasher();
    let password = "a".repeat(500) + "B1!";

    let record = hasher.hash(&password);

    assert!(hasher.verify(&password, &record));
}

#[test]
fn test_verify_never_panics_on_malformed_records() {
    let hasher = create_hasher();

    // None of these are valid records; all must return false, not panic
    let malformed = [
        "",
        ":",
        "::",
        "no-separator-at-all",
        "a:b:c",
        "a:b:c:d",
        "!!!:AAAA",
        "AAAA:!!!",
        "AAAA:",
        ":AAAA",
        "špatně:záznam",
    ];

    for record in malformed {
        assert!(
            !hasher.verify("password", record),
            "malformed record {:?} must fail closed",
            record
        );
    }
}

#[test]
fn test_verify_rejects_truncated_digest() {
    let hasher = create_hasher();
    let record = hasher.hash("TestPassword123!");

    let (salt, digest) = record.split_once(':').unwrap();
    let truncated = format!("{}:{}", salt, &digest[..digest.len() - 4]);

    assert!(!hasher.verify("TestPassword123!", &truncated));
}

#[test]
fn test_different_peppers_do_not_cross_verify() {
    let record = PasswordHasher::new("pepper-one-value").hash("TestPassword123!");

    assert!(!PasswordHasher::new("pepper-two-value").verify("TestPassword123!", &record));
}
