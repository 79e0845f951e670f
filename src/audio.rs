//! Sound cues with mute and autoplay-unlock gating.
//!
//! Playback is best effort: backend errors are logged and dropped so a
//! missing sound device never affects the game.

use std::io::{self, Write};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cue {
    Jump,
    Point,
    Hit,
    Die,
}

impl Cue {
    pub const ALL: [Cue; 4] = [Cue::Jump, Cue::Point, Cue::Hit, Cue::Die];

    pub fn name(self) -> &'static str {
        match self {
            Cue::Jump => "jump",
            Cue::Point => "point",
            Cue::Hit => "hit",
            Cue::Die => "die",
        }
    }
}

/// A device that can play the four cues.
pub trait CueBackend {
    /// Rewind the cue to its start and play it.
    fn play(&mut self, cue: Cue) -> io::Result<()>;
}

/// Plays nothing.
#[derive(Debug, Default)]
pub struct SilentBackend;

impl CueBackend for SilentBackend {
    fn play(&mut self, _cue: Cue) -> io::Result<()> {
        Ok(())
    }
}

/// Rings the terminal bell for scoring and death; jumps and hits stay quiet.
pub struct BellBackend<W: Write> {
    out: W,
}

impl<W: Write> BellBackend<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }
}

impl<W: Write> CueBackend for BellBackend<W> {
    fn play(&mut self, cue: Cue) -> io::Result<()> {
        match cue {
            Cue::Point | Cue::Die => {
                self.out.write_all(b"\x07")?;
                self.out.flush()
            }
            Cue::Jump | Cue::Hit => Ok(()),
        }
    }
}

/// The cue service used by the game.
pub struct AudioCues {
    backend: Box<dyn CueBackend>,
    unlocked: bool,
}

impl AudioCues {
    pub fn new(backend: Box<dyn CueBackend>) -> Self {
        Self {
            backend,
            unlocked: false,
        }
    }

    pub fn silent() -> Self {
        Self::new(Box::new(SilentBackend))
    }

    /// Allow playback. Happens once, on the first player interaction.
    pub fn unlock(&mut self) {
        if !self.unlocked {
            tracing::debug!("audio unlocked");
            self.unlocked = true;
        }
    }

    pub fn is_unlocked(&self) -> bool {
        self.unlocked
    }

    /// Play `cue` unless muted or still locked. Returns whether the backend
    /// was asked to play.
    pub fn play(&mut self, cue: Cue, muted: bool) -> bool {
        if muted || !self.unlocked {
            return false;
        }
        if let Err(e) = self.backend.play(cue) {
            tracing::debug!(cue = cue.name(), error = %e, "cue playback failed");
        }
        true
    }
}

impl std::fmt::Debug for AudioCues {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AudioCues")
            .field("unlocked", &self.unlocked)
            .finish_non_exhaustive()
    }
}

/// Synthesized tones through the default output device.
#[cfg(feature = "audio")]
pub mod tones {
    use super::{Cue, CueBackend};
    use rodio::source::{SineWave, Source};
    use rodio::{OutputStream, OutputStreamHandle, Sink};
    use std::io;
    use std::time::Duration;

    pub struct ToneBackend {
        _stream: OutputStream,
        handle: OutputStreamHandle,
    }

    impl ToneBackend {
        pub fn new() -> io::Result<Self> {
            let (stream, handle) = OutputStream::try_default()
                .map_err(|e| io::Error::new(io::ErrorKind::NotFound, e))?;
            Ok(Self {
                _stream: stream,
                handle,
            })
        }
    }

    /// (frequency Hz, duration ms) per cue.
    fn tone(cue: Cue) -> (f32, u64) {
        match cue {
            Cue::Jump => (660.0, 60),
            Cue::Point => (880.0, 120),
            Cue::Hit => (220.0, 120),
            Cue::Die => (110.0, 400),
        }
    }

    impl CueBackend for ToneBackend {
        fn play(&mut self, cue: Cue) -> io::Result<()> {
            let (freq, ms) = tone(cue);
            let sink =
                Sink::try_new(&self.handle).map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;
            sink.append(
                SineWave::new(freq)
                    .take_duration(Duration::from_millis(ms))
                    .amplify(0.15),
            );
            sink.detach();
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    /// Records every cue it is asked to play.
    struct Recorder(Arc<Mutex<Vec<Cue>>>);

    impl CueBackend for Recorder {
        fn play(&mut self, cue: Cue) -> io::Result<()> {
            self.0.lock().unwrap().push(cue);
            Ok(())
        }
    }

    struct Broken;

    impl CueBackend for Broken {
        fn play(&mut self, _cue: Cue) -> io::Result<()> {
            Err(io::Error::new(io::ErrorKind::PermissionDenied, "autoplay blocked"))
        }
    }

    #[test]
    fn test_locked_until_unlock() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut cues = AudioCues::new(Box::new(Recorder(log.clone())));
        assert!(!cues.play(Cue::Jump, false));
        cues.unlock();
        assert!(cues.play(Cue::Jump, false));
        assert_eq!(*log.lock().unwrap(), vec![Cue::Jump]);
    }

    #[test]
    fn test_mute_blocks_playback() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut cues = AudioCues::new(Box::new(Recorder(log.clone())));
        cues.unlock();
        assert!(!cues.play(Cue::Point, true));
        assert!(log.lock().unwrap().is_empty());
    }

    #[test]
    fn test_backend_errors_are_swallowed() {
        let mut cues = AudioCues::new(Box::new(Broken));
        cues.unlock();
        assert!(cues.play(Cue::Die, false));
    }

    #[test]
    fn test_bell_rings_for_point_and_die_only() {
        let mut bell = BellBackend::new(Vec::new());
        for cue in Cue::ALL {
            bell.play(cue).unwrap();
        }
        assert_eq!(bell.out, b"\x07\x07".to_vec());
    }
}
