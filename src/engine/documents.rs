// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Proteus-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Budgeted storage for user-supplied text documents.
//!
//! Oversized files are refused outright; everything else is kept, with the
//! stored text truncated to a preview ceiling and the whole vault bounded
//! by an aggregate character budget so attachments cannot grow without
//! limit.

use std::fmt;
use std::time::SystemTime;

use crate::model::DocumentId;

/// Stored text is cut at this many characters; a marker is appended when
/// truncation happens, so a truncated document stores `LIMIT + 1` chars.
pub const DOC_PREVIEW_CHAR_LIMIT: usize = 5_000;

pub const DOC_TRUNCATION_MARKER: char = '…';

/// Declared file sizes above this are rejected outright (1 MiB).
pub const DOC_MAX_DECLARED_BYTES: u64 = 1_048_576;

/// Ceiling on the sum of stored characters across all documents.
pub const DOC_TOTAL_CHAR_BUDGET: usize = 25_000;

/// A document offered for attachment, as described by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentCandidate {
    pub name: String,
    pub kind: String,
    pub content: String,
    pub declared_bytes: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Attachment {
    document_id: DocumentId,
    name: String,
    kind: String,
    content: String,
    declared_bytes: u64,
    display_bytes: usize,
    truncated: bool,
    checksum: u64,
    uploaded_at: SystemTime,
}

impl Attachment {
    pub fn document_id(&self) -> &DocumentId {
        &self.document_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// Stored (possibly truncated) text.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Size the host declared at upload time; survives truncation.
    pub fn declared_bytes(&self) -> u64 {
        self.declared_bytes
    }

    /// Character count of the stored text.
    pub fn display_bytes(&self) -> usize {
        self.display_bytes
    }

    pub fn truncated(&self) -> bool {
        self.truncated
    }

    pub fn checksum(&self) -> u64 {
        self.checksum
    }

    pub fn uploaded_at(&self) -> SystemTime {
        self.uploaded_at
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttachmentError {
    FileTooLarge {
        name: String,
        declared_bytes: u64,
    },
    StorageLimitReached {
        name: String,
        stored_chars: usize,
        incoming_chars: usize,
    },
}

impl fmt::Display for AttachmentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FileTooLarge {
                name,
                declared_bytes,
            } => write!(
                f,
                "{name} is too large to preview ({declared_bytes} bytes exceeds the \
                 {DOC_MAX_DECLARED_BYTES}-byte limit)"
            ),
            Self::StorageLimitReached {
                name,
                stored_chars,
                incoming_chars,
            } => write!(
                f,
                "storage limit reached: adding {name} ({incoming_chars} chars on top of \
                 {stored_chars}) would exceed the {DOC_TOTAL_CHAR_BUDGET}-character budget"
            ),
        }
    }
}

impl std::error::Error for AttachmentError {}

fn fnv1a(text: &str) -> u64 {
    const OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
    const PRIME: u64 = 0x0000_0100_0000_01b3;

    let mut hash = OFFSET;
    for byte in text.as_bytes() {
        hash ^= u64::from(*byte);
        hash = hash.wrapping_mul(PRIME);
    }
    hash
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct DocumentVault {
    documents: Vec<Attachment>,
    next_document: u64,
}

impl DocumentVault {
    pub(crate) fn new() -> Self {
        Self {
            documents: Vec::new(),
            next_document: 1,
        }
    }

    pub(crate) fn documents(&self) -> &[Attachment] {
        &self.documents
    }

    /// Sum of stored characters across the vault.
    pub(crate) fn stored_chars(&self) -> usize {
        self.documents.iter().map(Attachment::display_bytes).sum()
    }

    pub(crate) fn add(
        &mut self,
        candidate: DocumentCandidate,
        now: SystemTime,
    ) -> Result<DocumentId, AttachmentError> {
        let DocumentCandidate {
            name,
            kind,
            content,
            declared_bytes,
        } = candidate;

        if declared_bytes > DOC_MAX_DECLARED_BYTES {
            return Err(AttachmentError::FileTooLarge {
                name,
                declared_bytes,
            });
        }

        let mut stored = content;
        let mut truncated = false;
        if stored.chars().count() > DOC_PREVIEW_CHAR_LIMIT {
            stored = stored.chars().take(DOC_PREVIEW_CHAR_LIMIT).collect();
            stored.push(DOC_TRUNCATION_MARKER);
            truncated = true;
        }

        let display_bytes = stored.chars().count();
        let stored_chars = self.stored_chars();
        if stored_chars + display_bytes > DOC_TOTAL_CHAR_BUDGET {
            return Err(AttachmentError::StorageLimitReached {
                name,
                stored_chars,
                incoming_chars: display_bytes,
            });
        }

        let mut buffer = itoa::Buffer::new();
        let mut value = String::with_capacity(21);
        value.push('d');
        value.push_str(buffer.format(self.next_document));
        let document_id =
            DocumentId::new(value).expect("prefixed decimal counter is a valid id");
        self.next_document = self.next_document.saturating_add(1);

        let checksum = fnv1a(&stored);
        self.documents.push(Attachment {
            document_id: document_id.clone(),
            name,
            kind,
            content: stored,
            declared_bytes,
            display_bytes,
            truncated,
            checksum,
            uploaded_at: now,
        });

        Ok(document_id)
    }

    pub(crate) fn remove(&mut self, document_id: &DocumentId) -> bool {
        let before = self.documents.len();
        self.documents
            .retain(|attachment| attachment.document_id() != document_id);
        self.documents.len() != before
    }
}

#[cfg(test)]
mod tests {
    use std::time::SystemTime;

    use super::{
        AttachmentError, DocumentCandidate, DocumentVault, DOC_MAX_DECLARED_BYTES,
        DOC_PREVIEW_CHAR_LIMIT, DOC_TRUNCATION_MARKER,
    };

    fn candidate(name: &str, content: String) -> DocumentCandidate {
        DocumentCandidate {
            name: name.to_owned(),
            kind: "text/plain".to_owned(),
            declared_bytes: content.len() as u64,
            content,
        }
    }

    fn add(vault: &mut DocumentVault, name: &str, content: String) -> Result<(), AttachmentError> {
        vault
            .add(candidate(name, content), SystemTime::UNIX_EPOCH)
            .map(|_| ())
    }

    #[test]
    fn content_at_the_limit_is_stored_untruncated() {
        let mut vault = DocumentVault::new();
        let id = vault
            .add(
                candidate("notes.txt", "x".repeat(DOC_PREVIEW_CHAR_LIMIT)),
                SystemTime::UNIX_EPOCH,
            )
            .expect("add");

        let attachment = &vault.documents()[0];
        assert_eq!(attachment.document_id(), &id);
        assert!(!attachment.truncated());
        assert_eq!(attachment.display_bytes(), DOC_PREVIEW_CHAR_LIMIT);
        assert_eq!(attachment.content().chars().count(), DOC_PREVIEW_CHAR_LIMIT);
    }

    #[test]
    fn content_over_the_limit_is_truncated_with_marker() {
        let mut vault = DocumentVault::new();
        vault
            .add(
                candidate("notes.txt", "x".repeat(DOC_PREVIEW_CHAR_LIMIT + 1)),
                SystemTime::UNIX_EPOCH,
            )
            .expect("add");

        let attachment = &vault.documents()[0];
        assert!(attachment.truncated());
        assert_eq!(attachment.display_bytes(), DOC_PREVIEW_CHAR_LIMIT + 1);
        assert_eq!(
            attachment.content().chars().last(),
            Some(DOC_TRUNCATION_MARKER)
        );
        assert_eq!(
            attachment.declared_bytes(),
            (DOC_PREVIEW_CHAR_LIMIT + 1) as u64
        );
    }

    #[test]
    fn oversized_declared_files_are_rejected_without_mutation() {
        let mut vault = DocumentVault::new();
        let mut huge = candidate("dump.bin", "tiny".to_owned());
        huge.declared_bytes = DOC_MAX_DECLARED_BYTES + 1;

        let err = vault
            .add(huge, SystemTime::UNIX_EPOCH)
            .expect_err("rejected");
        assert!(matches!(err, AttachmentError::FileTooLarge { .. }));
        assert!(vault.documents().is_empty());
    }

    #[test]
    fn aggregate_budget_rejects_the_fifth_truncated_document() {
        let mut vault = DocumentVault::new();
        for n in 0..4 {
            add(
                &mut vault,
                &format!("doc-{n}.txt"),
                "x".repeat(DOC_PREVIEW_CHAR_LIMIT + 1),
            )
            .expect("within budget");
        }
        assert_eq!(vault.stored_chars(), 4 * (DOC_PREVIEW_CHAR_LIMIT + 1));

        let err = add(
            &mut vault,
            "doc-4.txt",
            "x".repeat(DOC_PREVIEW_CHAR_LIMIT + 1),
        )
        .expect_err("over budget");

        assert!(matches!(err, AttachmentError::StorageLimitReached { .. }));
        assert_eq!(vault.documents().len(), 4);
        assert_eq!(vault.stored_chars(), 4 * (DOC_PREVIEW_CHAR_LIMIT + 1));
    }

    #[test]
    fn rejection_messages_are_distinct() {
        let too_large = AttachmentError::FileTooLarge {
            name: "a.txt".to_owned(),
            declared_bytes: DOC_MAX_DECLARED_BYTES + 1,
        };
        let over_budget = AttachmentError::StorageLimitReached {
            name: "a.txt".to_owned(),
            stored_chars: 24_000,
            incoming_chars: 5_001,
        };

        assert!(too_large.to_string().contains("too large to preview"));
        assert!(over_budget.to_string().contains("storage limit reached"));
        assert_ne!(too_large.to_string(), over_budget.to_string());
    }

    #[test]
    fn checksum_tracks_stored_content() {
        let mut vault = DocumentVault::new();
        add(&mut vault, "a.txt", "same text".to_owned()).expect("add");
        add(&mut vault, "b.txt", "same text".to_owned()).expect("add");
        add(&mut vault, "c.txt", "other text".to_owned()).expect("add");

        let docs = vault.documents();
        assert_eq!(docs[0].checksum(), docs[1].checksum());
        assert_ne!(docs[0].checksum(), docs[2].checksum());
    }

    #[test]
    fn remove_frees_budget() {
        let mut vault = DocumentVault::new();
        add(&mut vault, "a.txt", "x".repeat(100)).expect("add");
        let document_id = vault.documents()[0].document_id().clone();

        assert!(vault.remove(&document_id));
        assert!(!vault.remove(&document_id));
        assert_eq!(vault.stored_chars(), 0);
    }
}
