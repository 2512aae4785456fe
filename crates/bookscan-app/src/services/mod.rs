// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Service layer — wires the pipeline, metadata lookup and host bridge
// together for the command line.

pub mod app_services;
pub mod data_dir;
