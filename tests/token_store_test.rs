//! Tests for FileTokenStore and FileCredentialStore

use std::sync::Arc;

use tempfile::TempDir;

use googlecl::domain::AuthToken;
use googlecl::infrastructure::credentials::{
    CredentialStore, FileCredentialStore, CREDS_FILENAME, DEVKEY_FILENAME,
};
use googlecl::infrastructure::paths::XdgPaths;
use googlecl::infrastructure::token_store::{FileTokenStore, TokenStore};
use googlecl::infrastructure::traits::RealFileSystem;
use googlecl::util::testing::init_test_logging;

const EMAIL: &str = "joe@example.com";

fn token_store(dir: &TempDir) -> FileTokenStore {
    init_test_logging();
    FileTokenStore::new(XdgPaths::rooted(dir.path()), Arc::new(RealFileSystem))
}

fn credential_store(dir: &TempDir) -> FileCredentialStore {
    FileCredentialStore::new(XdgPaths::rooted(dir.path()), Arc::new(RealFileSystem))
}

#[cfg(unix)]
fn mode_of(path: &std::path::Path) -> u32 {
    use std::os::unix::fs::PermissionsExt;
    std::fs::metadata(path).unwrap().permissions().mode() & 0o777
}

#[test]
fn given_tokens_for_two_services_when_reading_then_each_is_kept() {
    // Arrange
    let temp = TempDir::new().unwrap();
    let store = token_store(&temp);

    // Act
    store.write("picasa", EMAIL, &AuthToken::new("p-tok")).unwrap();
    store.write("Blogger", EMAIL, &AuthToken::new("b-tok")).unwrap();

    // Assert - service names are case-insensitive
    assert_eq!(store.read("PICASA", EMAIL), Some(AuthToken::new("p-tok")));
    assert_eq!(store.read("blogger", EMAIL), Some(AuthToken::new("b-tok")));
    assert_eq!(store.read("youtube", EMAIL), None);
    assert_eq!(store.read("picasa", "ann@example.com"), None);
}

#[test]
fn given_existing_token_when_writing_again_then_replaced() {
    // Arrange
    let temp = TempDir::new().unwrap();
    let store = token_store(&temp);
    store.write("docs", EMAIL, &AuthToken::new("old")).unwrap();

    // Act
    store.write("docs", EMAIL, &AuthToken::new("new")).unwrap();

    // Assert
    assert_eq!(store.read("docs", EMAIL), Some(AuthToken::new("new")));
}

#[test]
fn given_stored_token_when_removing_then_others_survive() {
    // Arrange
    let temp = TempDir::new().unwrap();
    let store = token_store(&temp);
    store.write("picasa", EMAIL, &AuthToken::new("p-tok")).unwrap();
    store.write("docs", EMAIL, &AuthToken::new("d-tok")).unwrap();

    // Act
    let removed = store.remove("picasa", EMAIL).unwrap();
    let removed_again = store.remove("picasa", EMAIL).unwrap();

    // Assert
    assert!(removed);
    assert!(!removed_again);
    assert_eq!(store.read("picasa", EMAIL), None);
    assert_eq!(store.read("docs", EMAIL), Some(AuthToken::new("d-tok")));
}

#[test]
fn given_no_record_when_removing_then_nothing_to_remove() {
    // Arrange
    let temp = TempDir::new().unwrap();
    let store = token_store(&temp);

    // Act / Assert
    assert!(!store.remove("picasa", EMAIL).unwrap());
    assert!(!temp.path().join(FileTokenStore::file_name(EMAIL)).exists());
}

#[test]
fn given_corrupt_record_when_reading_then_ignored_and_left_in_place() {
    // Arrange
    let temp = TempDir::new().unwrap();
    let path = temp.path().join(FileTokenStore::file_name(EMAIL));
    std::fs::write(&path, "this is = not [valid").unwrap();
    let store = token_store(&temp);

    // Act
    let token = store.read("picasa", EMAIL);

    // Assert
    assert_eq!(token, None);
    assert!(path.exists());
}

#[test]
fn given_corrupt_record_when_writing_then_moved_aside_and_replaced() {
    // Arrange
    let temp = TempDir::new().unwrap();
    let path = temp.path().join(FileTokenStore::file_name(EMAIL));
    let failed = temp
        .path()
        .join(format!("{}.failed", FileTokenStore::file_name(EMAIL)));
    std::fs::write(&failed, "older failure").unwrap();
    std::fs::write(&path, "garbage ][").unwrap();
    let store = token_store(&temp);

    // Act
    store.write("picasa", EMAIL, &AuthToken::new("fresh")).unwrap();

    // Assert
    assert_eq!(std::fs::read_to_string(&failed).unwrap(), "garbage ][");
    assert_eq!(store.read("picasa", EMAIL), Some(AuthToken::new("fresh")));
}

const BINARY_RECORD: &[u8] = &[0x80, 0x02, 0x7d, 0x71, 0x00, 0xff, 0xfe];

fn record_paths(temp: &TempDir) -> (std::path::PathBuf, std::path::PathBuf) {
    let name = FileTokenStore::file_name(EMAIL);
    (
        temp.path().join(&name),
        temp.path().join(format!("{name}.failed")),
    )
}

#[test]
fn given_binary_record_when_writing_then_moved_aside() {
    // Arrange
    let temp = TempDir::new().unwrap();
    let (path, failed) = record_paths(&temp);
    std::fs::write(&path, BINARY_RECORD).unwrap();
    let store = token_store(&temp);

    // Act
    store.write("picasa", EMAIL, &AuthToken::new("fresh")).unwrap();

    // Assert
    assert_eq!(std::fs::read(&failed).unwrap(), BINARY_RECORD);
    assert_eq!(store.read("picasa", EMAIL), Some(AuthToken::new("fresh")));
}

#[test]
fn given_binary_record_when_reading_then_absent() {
    // Arrange
    let temp = TempDir::new().unwrap();
    let (path, failed) = record_paths(&temp);
    std::fs::write(&path, BINARY_RECORD).unwrap();
    let store = token_store(&temp);

    // Act
    let token = store.read("picasa", EMAIL);

    // Assert
    assert_eq!(token, None);
    assert_eq!(std::fs::read(&path).unwrap(), BINARY_RECORD);
    assert!(!failed.exists());
}

#[test]
fn given_corrupt_record_when_removing_then_moved_aside() {
    // Arrange
    let temp = TempDir::new().unwrap();
    let (path, failed) = record_paths(&temp);
    std::fs::write(&path, "tokens = [broken").unwrap();
    let store = token_store(&temp);

    // Act
    let removed = store.remove("picasa", EMAIL).unwrap();

    // Assert
    assert!(!removed);
    assert_eq!(std::fs::read_to_string(&failed).unwrap(), "tokens = [broken");
    assert_eq!(store.read("picasa", EMAIL), None);
    assert!(path.exists(), "a fresh empty record replaces it");
}

#[cfg(unix)]
#[test]
fn given_new_record_when_writing_then_owner_only_permissions() {
    // Arrange
    let temp = TempDir::new().unwrap();
    let store = token_store(&temp);

    // Act
    store.write("picasa", EMAIL, &AuthToken::new("tok")).unwrap();

    // Assert
    let path = temp.path().join(FileTokenStore::file_name(EMAIL));
    assert_eq!(mode_of(&path), 0o600);
}

#[test]
fn given_no_creds_when_remembering_user_then_written_without_password() {
    // Arrange
    let temp = TempDir::new().unwrap();
    let store = credential_store(&temp);

    // Act
    store.remember_user(EMAIL).unwrap();

    // Assert
    let creds = store.read_creds().unwrap();
    assert_eq!(creds.email, EMAIL);
    assert_eq!(creds.password, None);
}

#[test]
fn given_cached_password_when_remembering_users_then_kept_only_for_same_email() {
    // Arrange
    let temp = TempDir::new().unwrap();
    std::fs::write(
        temp.path().join(CREDS_FILENAME),
        format!("email = \"{EMAIL}\"\npassword = \"hunter2\"\n"),
    )
    .unwrap();
    let store = credential_store(&temp);

    // Act
    store.remember_user(EMAIL).unwrap();
    let same = store.read_creds().unwrap();
    store.remember_user("ann@example.com").unwrap();
    let other = store.read_creds().unwrap();

    // Assert
    assert_eq!(same.password.as_deref(), Some("hunter2"));
    assert_eq!(other.email, "ann@example.com");
    assert_eq!(other.password, None);
}

#[test]
fn given_unreadable_creds_when_reading_then_none() {
    // Arrange
    let temp = TempDir::new().unwrap();
    std::fs::write(temp.path().join(CREDS_FILENAME), "not toml at all [").unwrap();
    let store = credential_store(&temp);

    // Act / Assert
    assert!(store.read_creds().is_none());
}

#[test]
fn given_devkey_when_writing_then_read_back_trimmed_and_private() {
    // Arrange
    let temp = TempDir::new().unwrap();
    let store = credential_store(&temp);
    assert!(store.read_devkey().is_none());

    // Act
    store.write_devkey("  AI39si-key \n").unwrap();

    // Assert
    assert_eq!(store.read_devkey().as_deref(), Some("AI39si-key"));
    #[cfg(unix)]
    assert_eq!(mode_of(&temp.path().join(DEVKEY_FILENAME)), 0o600);
}
