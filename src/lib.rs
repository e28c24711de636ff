//! # journey-export
//!
//! A CLI tool that converts [Journey](https://journey.cloud) journal backups
//! into a single static HTML page.
//!
//! ## What it does
//!
//! Journey backups are ZIP archives with one JSON record per journal entry
//! (Markdown text, POSIX-millisecond timestamp, optional address, photo
//! references). This tool extracts the archive, loads every record, renders
//! the Markdown, and writes one `index.html` with a block per entry: a
//! heading, the address if there is one, a photo gallery, and the entry text.
//!
//! The backup itself is never modified, and existing files are never
//! overwritten: a pre-existing extraction directory or output file aborts the
//! run before anything is touched.
//!
//! ## All-or-nothing
//!
//! A single malformed entry record aborts the whole run with exit code 10 and
//! no output file; filesystem problems (missing archive, collisions, corrupt
//! ZIP) exit with code 20. There is no partial output to clean up after a
//! failed run; rerunning from scratch is the only recovery path.
//!
//! ## Usage
//!
//! ```sh
//! # Extract journey-foo.zip and write journey-foo/index.html
//! journey-export journey-foo.zip
//!
//! # Render an already-extracted directory with local styling
//! journey-export ./journey-foo out.html --stylesheet journey.css
//! ```
//!
//! Preferences can be persisted in `~/.config/journey-export/config.toml`.
