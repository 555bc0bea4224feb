//! Conversion policy knobs.

/// How `numvoices` is chosen for converted instruments.
///
/// The source engine stores one patch-wide polyphony setting; whether that
/// should translate into per-instrument voice counts is an open question in
/// the format mapping, so both behaviors are offered and the conservative
/// one is the default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum VoiceAllocation {
    /// Every converted instrument gets exactly one voice.
    #[default]
    FixedSingle,
    /// Converted instruments inherit the document's polyphony setting
    /// (clamped to at least one voice).
    FromPolyphony,
}

/// Options controlling semantic conversion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConvertOptions {
    pub voice_allocation: VoiceAllocation,
}

impl ConvertOptions {
    /// Resolve the voice count for a document with the given polyphony.
    pub fn num_voices(&self, polyphony: u32) -> u32 {
        match self.voice_allocation {
            VoiceAllocation::FixedSingle => 1,
            VoiceAllocation::FromPolyphony => polyphony.max(1),
        }
    }
}
