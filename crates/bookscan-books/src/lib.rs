// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// bookscan-books — What happens after an ISBN is in hand.
//
// Looks the book up with a metadata provider (Google Books by default) and
// builds the share text and intent URLs handed to the platform bridge.

pub mod provider;
pub mod share;

pub use provider::{GoogleBooksClient, MetadataProvider, parse_volumes};
pub use share::{ShareTarget, share_text, slack_share_url, x_intent_url};
