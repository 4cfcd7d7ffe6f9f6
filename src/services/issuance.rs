// src/services/issuance.rs
//! Certificate issuance, revocation, and dashboard assembly.
//!
//! The orchestrator walks a certificate through commit, dual signing, and
//! the ledger write. Nothing is reported as issued until the ledger accepted
//! the transaction: any failure along the way surfaces to the caller before
//! an external store could persist an issued-but-unrecorded certificate.
//! Compensating cleanup of partially persisted external state is the
//! caller's responsibility.

use crate::commitment;
use crate::error::{Error, Result};
use crate::ledger::LedgerClient;
use crate::models::certificate::{Certificate, CertificateState};
use crate::models::record::{DashboardEntry, LedgerRecord};
use crate::services::signature::SignatureService;
use crate::wallet::FileWallet;
use log::{debug, info};
use serde::Serialize;
use std::sync::Arc;

/// Outcome of a successful issuance, returned for external persistence.
#[derive(Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct IssueReceipt {
    pub certificate_id: String,
    /// Commitment root over the full ordered attribute set.
    pub commitment: String,
    pub issuer_signature: String,
    pub subject_signature: String,
    /// Raw payload the ledger returned for the write.
    pub ledger_payload: String,
}

/// Orchestrates certificate issuance and revocation against the ledger.
pub struct CertificateIssuer {
    wallet: Arc<FileWallet>,
    signer: SignatureService,
    ledger: LedgerClient,
}

impl CertificateIssuer {
    pub fn new(wallet: Arc<FileWallet>, ledger: LedgerClient) -> Self {
        let signer = SignatureService::new(wallet.clone());
        CertificateIssuer {
            wallet,
            signer,
            ledger,
        }
    }

    /// Issues `certificate`: commit, sign as issuer and subject, record on
    /// the ledger.
    ///
    /// # Errors
    /// * `Error::MissingAttribute` - a schema attribute is absent or blank
    /// * `Error::IdentityNotFound` - issuer or subject lacks a wallet entry
    /// * `Error::Connection` / `Error::Transaction` - the ledger write failed;
    ///   the certificate must not be treated as issued
    pub async fn issue(&self, certificate: &Certificate) -> Result<IssueReceipt> {
        info!(
            "issuing certificate {} for {}",
            certificate.certificate_id, certificate.student_email
        );
        debug!("certificate {}: {}", certificate.certificate_id, CertificateState::Drafted);

        for (name, value) in certificate.attributes() {
            if value.trim().is_empty() {
                return Err(Error::MissingAttribute(name));
            }
        }

        let root = commitment::build_root(&certificate.ordered_values())?;
        debug!("certificate {}: {}", certificate.certificate_id, CertificateState::Committed);

        let issuer_signature = self.signer.sign(&root, &certificate.university_email)?;
        debug!("certificate {}: {}", certificate.certificate_id, CertificateState::SignedIssuer);

        let subject_signature = self.signer.sign(&root, &certificate.student_email)?;
        debug!("certificate {}: {}", certificate.certificate_id, CertificateState::SignedBoth);

        let issuer = self.identity(&certificate.university_email)?;
        let subject = self.identity(&certificate.student_email)?;

        let args = vec![
            root.clone(),
            issuer_signature.clone(),
            subject_signature.clone(),
            certificate.date_of_issue.clone(),
            certificate.certificate_id.clone(),
            issuer.public_key,
            subject.public_key,
        ];
        let ledger_payload = self
            .ledger
            .invoke(&certificate.university_email, "issueCertificate", &args)
            .await?;
        debug!("certificate {}: {}", certificate.certificate_id, CertificateState::Recorded);

        info!("certificate {} recorded on ledger", certificate.certificate_id);
        Ok(IssueReceipt {
            certificate_id: certificate.certificate_id.clone(),
            commitment: root,
            issuer_signature,
            subject_signature,
            ledger_payload,
        })
    }

    /// Records a revocation for `certificate_id` under the issuer's
    /// identity. The original issuance record stays untouched; the ledger
    /// appends the revocation as a linked fact.
    pub async fn revoke(&self, certificate_id: &str, by_issuer: &str) -> Result<String> {
        info!("revoking certificate {} as {}", certificate_id, by_issuer);
        let payload = self
            .ledger
            .invoke(by_issuer, "revokeCertificate", &[certificate_id.to_string()])
            .await?;
        debug!("certificate {}: {}", certificate_id, CertificateState::Revoked);
        Ok(payload)
    }

    /// Assembles the dashboard view for a university principal.
    ///
    /// Ledger records are fetched under the principal's identity and merged
    /// with `external` records from the certificate store; see
    /// [`merge_records`] for the merge rules.
    pub async fn dashboard(
        &self,
        principal: &str,
        external: &[Certificate],
    ) -> Result<Vec<DashboardEntry>> {
        let identity = self.identity(principal)?;
        let payload = self
            .ledger
            .query(
                principal,
                "getAllCertificateByUniversity",
                &[identity.public_key],
            )
            .await?;
        let ledger_records: Vec<LedgerRecord> = serde_json::from_str(&payload)?;
        Ok(merge_records(external, &ledger_records))
    }

    fn identity(&self, principal: &str) -> Result<crate::wallet::Identity> {
        self.wallet
            .get(principal)?
            .ok_or_else(|| Error::IdentityNotFound(principal.to_string()))
    }
}

/// Merges externally stored certificates with their ledger records by
/// certificate id.
///
/// The external store wins for display fields; the ledger wins for the
/// commitment and the revocation flag. An external record with no ledger
/// counterpart surfaces with `commitment: None`.
pub fn merge_records(external: &[Certificate], ledger: &[LedgerRecord]) -> Vec<DashboardEntry> {
    external
        .iter()
        .map(|stored| {
            let ledger_entry = ledger
                .iter()
                .find(|record| record.certificate_id == stored.certificate_id);
            let mut certificate = stored.clone();
            if let Some(record) = ledger_entry {
                certificate.revoked = record.revoked;
            }
            DashboardEntry {
                certificate,
                commitment: ledger_entry.map(|record| record.commitment.clone()),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::GatewayConfig;
    use mockito::Matcher;
    use serde_json::json;

    const ISSUER: &str = "registrar@example.edu";
    const SUBJECT: &str = "alice@university.edu";

    fn sample_certificate() -> Certificate {
        Certificate {
            student_name: "Alice".into(),
            student_email: SUBJECT.into(),
            university_name: "Example University".into(),
            university_email: ISSUER.into(),
            major: "CS".into(),
            department_name: "Computer Science".into(),
            cgpa: "3.9".into(),
            date_of_issue: "2026-06-01".into(),
            certificate_id: "EXU-2026-0042".into(),
            revoked: false,
        }
    }

    fn issuer_for(channel: &str, enroll: &[&str]) -> (tempfile::TempDir, Arc<FileWallet>, CertificateIssuer) {
        let dir = tempfile::tempdir().unwrap();
        let wallet = Arc::new(FileWallet::open(dir.path()).unwrap());
        for principal in enroll {
            wallet.enroll(principal).unwrap();
        }
        let config = GatewayConfig::new(mockito::server_url(), channel, "certcc");
        let ledger = LedgerClient::new(config, wallet.clone());
        let issuer = CertificateIssuer::new(wallet.clone(), ledger);
        (dir, wallet, issuer)
    }

    fn ledger_record(certificate_id: &str, commitment: &str, revoked: bool) -> LedgerRecord {
        LedgerRecord {
            certificate_id: certificate_id.into(),
            commitment: commitment.into(),
            issuer_signature: "aa".into(),
            subject_signature: "bb".into(),
            issue_date: "2026-06-01".into(),
            issuer_public_key: "04cc".into(),
            subject_public_key: "04dd".into(),
            revoked,
        }
    }

    #[tokio::test]
    async fn issue_commits_signs_twice_and_records() {
        let _ = env_logger::builder().is_test(true).try_init();
        let (_dir, wallet, issuer) = issuer_for("chan-issue", &[ISSUER, SUBJECT]);
        let mock = mockito::mock("POST", "/channels/chan-issue/chaincodes/certcc/submit")
            .match_body(Matcher::PartialJson(json!({
                "function": "issueCertificate",
                "principal": ISSUER,
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"payload":"tx-1"}"#)
            .create();

        let certificate = sample_certificate();
        let receipt = issuer.issue(&certificate).await.unwrap();
        mock.assert();

        assert_eq!(receipt.certificate_id, "EXU-2026-0042");
        assert_eq!(receipt.ledger_payload, "tx-1");
        assert_eq!(
            receipt.commitment,
            commitment::build_root(&certificate.ordered_values()).unwrap()
        );

        // Both signatures are over the same root, each under its own key.
        let issuer_identity = wallet.get(ISSUER).unwrap().unwrap();
        let subject_identity = wallet.get(SUBJECT).unwrap().unwrap();
        assert!(SignatureService::verify(
            &receipt.commitment,
            &receipt.issuer_signature,
            &issuer_identity.public_key
        )
        .unwrap());
        assert!(SignatureService::verify(
            &receipt.commitment,
            &receipt.subject_signature,
            &subject_identity.public_key
        )
        .unwrap());
        assert_ne!(receipt.issuer_signature, receipt.subject_signature);
    }

    #[tokio::test]
    async fn issue_rejects_blank_attributes_before_signing() {
        let (_dir, _wallet, issuer) = issuer_for("chan-blank", &[ISSUER, SUBJECT]);
        let mut certificate = sample_certificate();
        certificate.cgpa = "  ".into();

        let result = issuer.issue(&certificate).await;
        assert!(matches!(result, Err(Error::MissingAttribute("cgpa"))));
    }

    #[tokio::test]
    async fn issue_requires_both_identities() {
        let (_dir, _wallet, issuer) = issuer_for("chan-half", &[ISSUER]);
        let result = issuer.issue(&sample_certificate()).await;
        assert!(matches!(result, Err(Error::IdentityNotFound(p)) if p == SUBJECT));
    }

    #[tokio::test]
    async fn ledger_failure_means_not_issued() {
        let (_dir, _wallet, issuer) = issuer_for("chan-fail", &[ISSUER, SUBJECT]);
        let _mock = mockito::mock("POST", "/channels/chan-fail/chaincodes/certcc/submit")
            .with_status(500)
            .with_header("content-type", "application/json")
            .with_body(r#"{"error":"endorsement failed"}"#)
            .create();

        let result = issuer.issue(&sample_certificate()).await;
        assert!(matches!(result, Err(Error::Transaction { .. })));
    }

    #[tokio::test]
    async fn revoke_submits_only_the_certificate_id() {
        let (_dir, _wallet, issuer) = issuer_for("chan-revoke", &[ISSUER]);
        let mock = mockito::mock("POST", "/channels/chan-revoke/chaincodes/certcc/submit")
            .match_body(Matcher::Json(json!({
                "function": "revokeCertificate",
                "args": ["EXU-2026-0042"],
                "principal": ISSUER,
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"payload":"revoked"}"#)
            .create();

        let payload = issuer.revoke("EXU-2026-0042", ISSUER).await.unwrap();
        assert_eq!(payload, "revoked");
        mock.assert();
    }

    #[tokio::test]
    async fn dashboard_merges_ledger_and_external_records() {
        let (_dir, _wallet, issuer) = issuer_for("chan-dash", &[ISSUER]);
        let on_ledger = vec![ledger_record("EXU-2026-0042", "feedface", true)];
        let body = json!({ "payload": serde_json::to_string(&on_ledger).unwrap() }).to_string();
        let mock = mockito::mock("POST", "/channels/chan-dash/chaincodes/certcc/evaluate")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(body)
            .create();

        let recorded = sample_certificate();
        let mut unrecorded = sample_certificate();
        unrecorded.certificate_id = "EXU-2026-0099".into();

        let entries = issuer
            .dashboard(ISSUER, &[recorded, unrecorded])
            .await
            .unwrap();
        mock.assert();

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].commitment.as_deref(), Some("feedface"));
        assert!(entries[0].certificate.revoked);
        assert_eq!(entries[0].certificate.student_name, "Alice");
        assert_eq!(entries[1].commitment, None);
        assert!(!entries[1].certificate.revoked);
    }

    #[test]
    fn merge_prefers_ledger_for_commitment_and_revocation() {
        let mut stored = sample_certificate();
        stored.revoked = false;
        let ledger = vec![ledger_record("EXU-2026-0042", "c0ffee", true)];

        let merged = merge_records(&[stored], &ledger);
        assert_eq!(merged[0].commitment.as_deref(), Some("c0ffee"));
        assert!(merged[0].certificate.revoked);
    }
}
