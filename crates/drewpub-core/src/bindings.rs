use crate::chunks::{Chunk, VoiceType};
use crate::engine::{PlaybackSnapshot, PlaybackState};
use crate::segmenter::{Gender, Segment};
use crate::voices::{Voice, VoiceAssignment};
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use ts_rs::TS;

const INDEX_TS: &str = r#"export type { Segment } from "./Segment";
export type { Gender } from "./Gender";
export type { Chunk } from "./Chunk";
export type { VoiceType } from "./VoiceType";
export type { Voice } from "./Voice";
export type { VoiceAssignment } from "./VoiceAssignment";
export type { PlaybackState } from "./PlaybackState";
export type { PlaybackSnapshot } from "./PlaybackSnapshot";
"#;

fn export_single_type<T: TS + 'static>(out_dir: &Path) -> Result<()> {
    T::export_all_to(out_dir).with_context(|| format!("exporting {}", T::name()))
}

/// Writes the UI-facing types to `out_dir`, replacing any stale `.ts` files.
pub fn export_ts_bindings(out_dir: &Path) -> Result<()> {
    fs::create_dir_all(out_dir)
        .with_context(|| format!("Failed to create {}", out_dir.display()))?;

    for entry in
        fs::read_dir(out_dir).with_context(|| format!("Failed to list {}", out_dir.display()))?
    {
        let path = entry.context("Failed to read entry")?.path();
        if path.extension().and_then(|ext| ext.to_str()) == Some("ts") {
            fs::remove_file(&path)
                .with_context(|| format!("Failed to remove {}", path.display()))?;
        }
    }

    export_single_type::<Segment>(out_dir)?;
    export_single_type::<Gender>(out_dir)?;
    export_single_type::<Chunk>(out_dir)?;
    export_single_type::<VoiceType>(out_dir)?;
    export_single_type::<Voice>(out_dir)?;
    export_single_type::<VoiceAssignment>(out_dir)?;
    export_single_type::<PlaybackState>(out_dir)?;
    export_single_type::<PlaybackSnapshot>(out_dir)?;

    let index = out_dir.join("index.ts");
    fs::write(&index, INDEX_TS).with_context(|| format!("Failed to write {}", index.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_every_type_and_index() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("Stale.ts"), "export type Stale = never;").unwrap();

        export_ts_bindings(dir.path()).unwrap();

        for name in [
            "Segment",
            "Gender",
            "Chunk",
            "VoiceType",
            "Voice",
            "VoiceAssignment",
            "PlaybackState",
            "PlaybackSnapshot",
            "index",
        ] {
            assert!(dir.path().join(format!("{name}.ts")).exists(), "{name}.ts");
        }
        assert!(!dir.path().join("Stale.ts").exists());
    }
}
