mod sha1_hasher;

pub use sha1_hasher::Sha1PasswordHasher;
