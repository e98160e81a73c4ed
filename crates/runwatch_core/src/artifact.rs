/// Media kind inferred from an artifact's file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactKind {
    Image,
    Audio,
    Video,
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedArtifact {
    pub path: String,
    pub file_name: String,
    pub kind: ArtifactKind,
}

const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif"];
const AUDIO_EXTENSIONS: &[&str] = &["mp3", "wav", "m4a"];
const VIDEO_EXTENSIONS: &[&str] = &["mp4", "avi", "mov"];

/// Splits off the file name and infers the media kind. Total over all inputs.
pub fn classify_artifact(path: &str) -> ClassifiedArtifact {
    let file_name = path.rsplit('/').next().unwrap_or(path);
    ClassifiedArtifact {
        path: path.to_string(),
        file_name: file_name.to_string(),
        kind: kind_for_file_name(file_name),
    }
}

fn kind_for_file_name(file_name: &str) -> ArtifactKind {
    let Some((_, extension)) = file_name.rsplit_once('.') else {
        return ArtifactKind::Other;
    };
    let in_set = |set: &[&str]| set.iter().any(|ext| ext.eq_ignore_ascii_case(extension));
    if in_set(IMAGE_EXTENSIONS) {
        ArtifactKind::Image
    } else if in_set(AUDIO_EXTENSIONS) {
        ArtifactKind::Audio
    } else if in_set(VIDEO_EXTENSIONS) {
        ArtifactKind::Video
    } else {
        ArtifactKind::Other
    }
}
