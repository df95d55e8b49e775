use uuid::Uuid;

/// Provisions independent copies of external secret resources.
///
/// Duplicating a node must never leave two nodes sharing one live secret,
/// so the store maps every secret id on the copy through this trait. The
/// provisioning call itself is an external collaborator's concern;
/// implementations decide whether to mint a local placeholder or call out.
pub trait SecretProvisioner {
  /// A fresh secret id for the duplicate, independent of `secret_id`.
  fn duplicate_secret(&mut self, secret_id: &str) -> String;
}

/// Default provisioner: mints draft secret ids locally.
///
/// The save flow swaps these for server-issued secrets the same way draft
/// node ids are re-keyed on commit.
#[derive(Debug, Clone, Default)]
pub struct DraftSecretProvisioner;

impl SecretProvisioner for DraftSecretProvisioner {
  fn duplicate_secret(&mut self, _secret_id: &str) -> String {
    format!("draft-secret-{}", Uuid::new_v4())
  }
}
