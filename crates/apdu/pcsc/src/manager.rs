//! Device manager for PC/SC operations

use std::ffi::CString;
use std::time::{Duration, Instant};

use pcsc::{Context, ReaderState, Scope, State};
use tracing::{debug, info};

use crate::config::PcscConfig;
use crate::error::PcscError;
use crate::reader::PcscReader;
use crate::transport::PcscTransport;
use crate::util::AtrPattern;

/// Manager for PC/SC device operations
#[allow(missing_debug_implementations)]
pub struct PcscDeviceManager {
    /// PC/SC context
    context: Context,
}

impl PcscDeviceManager {
    /// Create a new PC/SC device manager
    pub fn new() -> Result<Self, PcscError> {
        let context = Context::establish(Scope::User)?;
        Ok(Self { context })
    }

    fn reader_names(&self) -> Result<Vec<CString>, PcscError> {
        match self.context.list_readers_owned() {
            Ok(readers) => Ok(readers),
            Err(pcsc::Error::NoReadersAvailable) => Ok(Vec::new()),
            Err(e) => Err(e.into()),
        }
    }

    /// List all available card readers
    pub fn list_readers(&self) -> Result<Vec<PcscReader>, PcscError> {
        let readers = self.reader_names()?;
        if readers.is_empty() {
            return Err(PcscError::NoReadersAvailable);
        }

        let mut result = Vec::with_capacity(readers.len());

        for reader_name in readers {
            let mut reader_states = [ReaderState::new(reader_name.as_c_str(), State::UNAWARE)];

            match self.context.get_status_change(None, &mut reader_states) {
                Ok(()) => result.push(PcscReader::from_reader_state(&reader_states[0])),
                Err(e) => {
                    debug!(reader = ?reader_name, error = %e, "Could not query reader state");
                    result.push(PcscReader::new(
                        reader_name.to_string_lossy().into_owned(),
                        false,
                        None,
                    ));
                }
            }
        }

        Ok(result)
    }

    /// Open a connection to a specific reader
    pub fn open_reader(&self, reader_name: &str) -> Result<PcscTransport, PcscError> {
        self.open_reader_with_config(reader_name, PcscConfig::default())
    }

    /// Open a connection to a specific reader with custom configuration
    pub fn open_reader_with_config(
        &self,
        reader_name: &str,
        config: PcscConfig,
    ) -> Result<PcscTransport, PcscError> {
        let context = self.context.clone();
        PcscTransport::new(context, reader_name, config)
    }

    /// Block until a card whose ATR matches one of `patterns` is present
    ///
    /// Only the named reader is watched when `reader` is given. Readers plugged in
    /// while waiting are picked up. Fails with [`PcscError::Timeout`] once `timeout`
    /// has elapsed.
    pub fn wait_for_card(
        &self,
        patterns: &[AtrPattern],
        reader: Option<&str>,
        timeout: Duration,
    ) -> Result<PcscReader, PcscError> {
        let deadline = Instant::now() + timeout;
        let mut states = vec![ReaderState::new(pcsc::PNP_NOTIFICATION(), State::UNAWARE)];

        info!(timeout_secs = timeout.as_secs(), "Waiting for card");

        loop {
            self.refresh_reader_states(&mut states, reader)?;

            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                return Err(PcscError::Timeout);
            }

            for state in &mut states {
                state.sync_current_state();
            }

            match self.context.get_status_change(Some(remaining), &mut states) {
                Ok(()) => {}
                Err(pcsc::Error::Timeout) => return Err(PcscError::Timeout),
                Err(e) => return Err(e.into()),
            }

            for state in states.iter().filter(|s| !is_pnp(s)) {
                let found = PcscReader::from_reader_state(state);
                let Some(atr) = found.atr() else { continue };

                if AtrPattern::any_matches(patterns, atr) {
                    info!(reader = %found.name(), "Card found");
                    return Ok(found);
                }
                debug!(reader = %found.name(), atr = %hex::encode(atr), "Ignoring card with unknown ATR");
            }
        }
    }

    /// Track the current reader set, dropping readers that went away
    fn refresh_reader_states(
        &self,
        states: &mut Vec<ReaderState>,
        wanted: Option<&str>,
    ) -> Result<(), PcscError> {
        let names = self.reader_names()?;

        states.retain(|state| {
            is_pnp(state)
                || (!state.event_state().intersects(State::UNKNOWN | State::IGNORE)
                    && names.iter().any(|name| name.as_c_str() == state.name()))
        });

        for name in names {
            if wanted.is_some_and(|wanted| name.to_string_lossy() != wanted) {
                continue;
            }
            if !states.iter().any(|state| state.name() == name.as_c_str()) {
                debug!(reader = ?name, "Watching reader");
                states.push(ReaderState::new(name, State::UNAWARE));
            }
        }

        Ok(())
    }
}

fn is_pnp(state: &ReaderState) -> bool {
    state.name() == pcsc::PNP_NOTIFICATION()
}
