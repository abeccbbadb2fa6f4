#![doc = r##"
plistsplit — slice texture-packer sprite sheets back into individual sprites.

A sprite sheet is a composite texture plus an XML property-list descriptor
(`.plist`) listing every packed frame: its rectangle in the texture, whether it
was packed rotated, and trimming information. This crate reads the descriptor,
builds a typed sprite table, and crops each frame out of the texture into its
own PNG file. It powers the `plistsplit` CLI and can be embedded in asset
pipelines.

Quick start: extract next to the descriptor
-------------------------------------------
```rust,no_run
use plistsplit::{extract_plist, ExtractParams, RunContext};

fn main() -> plistsplit::Result<()> {
    // Sprites land in /art/ui/buttons/ (descriptor directory + base name)
    let params = ExtractParams::new("/art/ui/buttons.plist");
    let report = extract_plist(&params, &RunContext::from_current_dir()?)?;

    println!(
        "wrote {} sprite(s), skipped {}",
        report.extract.written.len(),
        report.extract.skipped.len()
    );
    Ok(())
}
```

Explicit output directory and frame manifest
--------------------------------------------
```rust,no_run
use plistsplit::{extract_plist, ExtractParams, RunContext};

fn main() -> plistsplit::Result<()> {
    let params = ExtractParams::new("sheets/hero.plist")
        .with_output_dir("build/sprites/hero")
        .with_manifest(true);

    let report = extract_plist(&params, &RunContext::new("/projects/game"))?;
    for warning in &report.warnings {
        eprintln!("warning: {warning}");
    }
    Ok(())
}
```

Working with the pieces
-----------------------
The descriptor parser and the extractor can be driven separately, e.g. to
inspect frame geometry without writing anything.

```rust
use plistsplit::{parse_frames, IntRect, PlistValue};

fn main() -> plistsplit::Result<()> {
    let doc: PlistValue = r#"<plist version="1.0"><dict>
        <key>frames</key>
        <dict>
            <key>hero/idle.png</key>
            <dict>
                <key>frame</key><string>{{2,2},{32,48}}</string>
                <key>rotated</key><false/>
            </dict>
        </dict>
    </dict></plist>"#
        .parse()?;

    let root = doc.as_dict().expect("dictionary root");
    let parsed = parse_frames(root)?;
    assert_eq!(parsed.sprites["hero/idle.png"].rect, IntRect::new(2, 2, 32, 48));
    Ok(())
}
```

Error handling
--------------
All public functions return `plistsplit::Result<T>`; match on `plistsplit::Error`
to tell input failures apart.

```rust,no_run
use plistsplit::{extract_plist, Error, ExtractParams, RunContext};

fn main() {
    let params = ExtractParams::new("/bad/path.plist");
    match extract_plist(&params, &RunContext::new("/")) {
        Ok(_) => {}
        Err(Error::Descriptor { path, source }) => eprintln!("descriptor {path:?}: {source}"),
        Err(Error::Texture { path, source }) => eprintln!("texture {path:?}: {source}"),
        Err(other) => eprintln!("Other error: {other}"),
    }
}
```

Useful modules
--------------
- [`api`] — high-level entry points and the run coordinator.
- [`core`] — descriptor parsing, sub-image extraction, path rules.
- [`io`] — property-list reader and the manifest writer.
- [`types`] — geometry and frame types (`IntRect`, `FrameInfo`, `SpriteTable`).
- [`error`] — crate-level `Error` and `Result`.
"##]

pub mod api;
pub mod core;
pub mod error;
pub mod io;
pub mod types;

// Types
pub use crate::core::params::ExtractParams;
pub use error::{Error, Result};
pub use types::{FrameInfo, IntRect, IntVector2, SpriteTable, Vec2};

// Document model
pub use io::plist::{PlistDict, PlistError, PlistValue, load_plist};

// Core steps
pub use crate::core::descriptor::{FrameWarning, ParsedDescriptor, parse_frames};
pub use crate::core::extract::{ExtractContext, ExtractReport, crop_frame, extract_sprites};

// High-level API re-exports
pub use api::{
    RunContext, RunReport, extract_plist, extract_plist_to_dir, load_descriptor, load_texture,
    texture_file_name,
};
