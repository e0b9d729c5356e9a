// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Proteus-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Persistence for canvas snapshots.
//!
//! The store module owns the textual canvas document format used by
//! export/import and best-effort snapshot saves, plus the key/value sink
//! abstraction hosts plug their storage into.

pub mod snapshot;

pub use snapshot::{
    decode_canvas, encode_canvas, CanvasDocument, DecodedCanvas, EdgeRecord, MemorySink,
    NodeRecord, SinkError, SnapshotError, SnapshotSink,
};
