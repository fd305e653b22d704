// PdfPress - Multi-Pass PDF Compression
// Copyright (C) 2025 PdfPress Contributors
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published
// by the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU Affero General Public License for more details.

//! CLI subcommands

mod compress;
mod doctor;

pub use compress::CompressCmd;
pub use doctor::DoctorCmd;
