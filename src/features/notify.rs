//! End-of-phase notifications.
//!
//! A finished work phase plays the work-end sound (`bell.wav` by default),
//! a finished break plays the break-end sound (`notif.wav`). Audio decoding
//! needs the `audio` feature; without it the sound files are still checked
//! and the terminal bell rings instead.

use std::io::Write;
use std::path::{Path, PathBuf};

use crate::config::SoundConfig;
use crate::error::RudoroError;
use crate::features::focus::Phase;

/// Something that reacts to a phase finishing.
#[cfg_attr(test, mockall::automock)]
pub trait Notifier {
    /// Called once when a phase counts down to zero.
    ///
    /// # Errors
    ///
    /// Returns `RudoroError::Sound` when the notification could not be
    /// delivered. Callers treat this as a warning.
    fn phase_finished(&self, phase: Phase) -> Result<(), RudoroError>;
}

/// Does nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentNotifier;

impl Notifier for SilentNotifier {
    fn phase_finished(&self, _phase: Phase) -> Result<(), RudoroError> {
        Ok(())
    }
}

/// Rings the terminal bell.
#[derive(Debug, Default, Clone, Copy)]
pub struct BellNotifier;

impl Notifier for BellNotifier {
    fn phase_finished(&self, _phase: Phase) -> Result<(), RudoroError> {
        ring_bell()
    }
}

/// Plays a sound file per phase kind.
#[derive(Debug, Clone)]
pub struct SoundNotifier {
    work_end: PathBuf,
    break_end: PathBuf,
}

impl SoundNotifier {
    /// Build from the sound settings, resolving files against the
    /// configured directory (the working directory by default).
    #[must_use]
    pub fn from_config(config: &SoundConfig) -> Self {
        let dir = config.directory.clone().unwrap_or_default();
        Self {
            work_end: dir.join(&config.work_end_file),
            break_end: dir.join(&config.break_end_file),
        }
    }

    /// Get the file played when `phase` finishes.
    #[must_use]
    pub fn file_for(&self, phase: Phase) -> &Path {
        if phase.is_break() {
            &self.break_end
        } else {
            &self.work_end
        }
    }
}

impl Notifier for SoundNotifier {
    fn phase_finished(&self, phase: Phase) -> Result<(), RudoroError> {
        let path = self.file_for(phase);
        if !path.is_file() {
            return Err(RudoroError::Sound(format!(
                "could not play '{}': file not found",
                path.display()
            )));
        }
        play_file(path)
    }
}

/// Pick a notifier for the sound settings.
#[must_use]
pub fn from_config(config: &SoundConfig) -> Box<dyn Notifier> {
    if config.enabled {
        Box::new(SoundNotifier::from_config(config))
    } else {
        Box::new(SilentNotifier)
    }
}

/// Rings on stderr so stdout stays clean for JSON output.
fn ring_bell() -> Result<(), RudoroError> {
    let mut stderr = std::io::stderr();
    stderr.write_all(b"\x07")?;
    stderr.flush()?;
    Ok(())
}

#[cfg(feature = "audio")]
fn play_file(path: &Path) -> Result<(), RudoroError> {
    use std::fs::File;
    use std::io::BufReader;

    use rodio::{Decoder, OutputStream, Sink};

    let sound_err = |e: &dyn std::fmt::Display| {
        RudoroError::Sound(format!("could not play '{}': {e}", path.display()))
    };

    let (_stream, handle) = OutputStream::try_default().map_err(|e| sound_err(&e))?;
    let sink = Sink::try_new(&handle).map_err(|e| sound_err(&e))?;
    let file = File::open(path)?;
    let source = Decoder::new(BufReader::new(file)).map_err(|e| sound_err(&e))?;

    log::debug!("Playing {}", path.display());
    sink.append(source);
    sink.sleep_until_end();
    Ok(())
}

#[cfg(not(feature = "audio"))]
fn play_file(path: &Path) -> Result<(), RudoroError> {
    log::debug!("Built without audio, ringing bell for {}", path.display());
    ring_bell()
}
