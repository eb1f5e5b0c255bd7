//! The Engine
//!
//! Owns everything that changes while running: the latest magnitude snapshot, band
//! amplitudes, histories, deltas, the title style, the style cadence and the current
//! channel.  All of it is driven from one thread through [`tick`](struct.Engine.html#method.tick).
use crate::analyzer::{self, Amplitude};
use crate::channel::{self, ChannelRequest};
use crate::error::{Error, Result};
use crate::{cadence, source, style};
use std::time;

/// Builder for Engine
#[derive(Debug, Default)]
pub struct EngineBuilder {
    /// Number of magnitudes per buffer
    ///
    /// Can also be set from config as `"engine.buffer_length"`.
    pub buffer_length: Option<usize>,

    /// Capacity of each band's history
    ///
    /// Can also be set from config as `"engine.stat_length"`.
    pub stat_length: Option<usize>,

    /// Band layout
    ///
    /// Can also be set from config as `"engine.bands"`, a list of `{ start, end, weight }`
    /// tables.
    pub bands: Option<Vec<analyzer::Band>>,

    /// Channels to cycle through
    ///
    /// Can also be set from config as `"engine.channels"`, a list of `{ title, uri }`
    /// tables.
    pub channels: Option<Vec<channel::Channel>>,

    /// Time between title style updates
    ///
    /// Can also be set from config as `"style.interval_ms"`.
    pub style_interval: Option<time::Duration>,

    /// Band whose delta decides between normal and italic
    ///
    /// Can also be set from config as `"style.italic_band"`.
    pub italic_band: Option<usize>,
}

impl EngineBuilder {
    pub fn new() -> EngineBuilder {
        Default::default()
    }

    pub fn buffer_length(&mut self, length: usize) -> &mut EngineBuilder {
        self.buffer_length = Some(length);
        self
    }

    pub fn stat_length(&mut self, length: usize) -> &mut EngineBuilder {
        self.stat_length = Some(length);
        self
    }

    pub fn bands(&mut self, bands: Vec<analyzer::Band>) -> &mut EngineBuilder {
        self.bands = Some(bands);
        self
    }

    pub fn channels(&mut self, channels: Vec<channel::Channel>) -> &mut EngineBuilder {
        self.channels = Some(channels);
        self
    }

    pub fn style_interval(&mut self, interval: time::Duration) -> &mut EngineBuilder {
        self.style_interval = Some(interval);
        self
    }

    pub fn italic_band(&mut self, band: usize) -> &mut EngineBuilder {
        self.italic_band = Some(band);
        self
    }

    /// Validate the layout and create a stopped engine
    pub fn build(
        &mut self,
        source: Box<dyn source::Source>,
        typesetter: Box<dyn style::Typesetter>,
    ) -> Result<Engine> {
        let buffer_length = self
            .buffer_length
            .unwrap_or_else(|| crate::CONFIG.get_or("engine.buffer_length", 1024));
        let stat_length = self
            .stat_length
            .unwrap_or_else(|| crate::CONFIG.get_or("engine.stat_length", 128));
        let bands = self.bands.clone().unwrap_or_else(|| {
            crate::CONFIG.get_or("engine.bands", analyzer::DEFAULT_BANDS.to_vec())
        });
        let channels = self
            .channels
            .clone()
            .unwrap_or_else(|| crate::CONFIG.get_or("engine.channels", channel::default_channels()));
        let style_interval = self.style_interval.unwrap_or_else(|| {
            time::Duration::from_millis(crate::CONFIG.get_or("style.interval_ms", 200))
        });
        let italic_band = self
            .italic_band
            .unwrap_or_else(|| crate::CONFIG.get_or("style.italic_band", 2));

        if stat_length == 0 {
            return Err(Error::ZeroHistory);
        }

        if style_interval == time::Duration::from_secs(0) {
            return Err(Error::ZeroInterval);
        }

        let table = analyzer::BandTable::new(bands, buffer_length)?;
        let selector = style::StyleSelector::new(italic_band, &table)?;
        let channels = channel::ChannelList::new(channels)?;

        Ok(Engine::new(
            table,
            selector,
            channels,
            stat_length,
            buffer_length,
            cadence::Cadence::new(style_interval),
            source,
            typesetter,
        ))
    }
}

pub struct Engine {
    table: analyzer::BandTable,
    aggregator: analyzer::BandAggregator,
    stats: analyzer::Statistics,
    deltas: analyzer::Deltas,
    selector: style::StyleSelector,
    cadence: cadence::Cadence,
    channels: channel::ChannelList,

    source: Box<dyn source::Source>,
    typesetter: Box<dyn style::Typesetter>,
    reader: Option<analyzer::MagnitudeReader>,
    magnitudes: Vec<analyzer::Magnitude>,
}

impl std::fmt::Debug for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "Engine {{ bands: {:?}, buffer: {:?}, channel: {:?}, running: {:?} }}",
            self.table.len(),
            self.magnitudes.len(),
            self.channels.current().title,
            self.cadence.is_running(),
        )
    }
}

impl Engine {
    #[allow(clippy::too_many_arguments)]
    fn new(
        table: analyzer::BandTable,
        selector: style::StyleSelector,
        channels: channel::ChannelList,
        stat_length: usize,
        buffer_length: usize,
        cadence: cadence::Cadence,
        source: Box<dyn source::Source>,
        typesetter: Box<dyn style::Typesetter>,
    ) -> Engine {
        let bands = table.len();

        let engine = Engine {
            aggregator: analyzer::BandAggregator::new(bands),
            stats: analyzer::Statistics::new(bands, stat_length),
            deltas: analyzer::Deltas::new(bands),
            table,
            selector,
            cadence,
            channels,

            source,
            typesetter,
            reader: None,
            magnitudes: vec![0; buffer_length],
        };

        log::debug!("Engine({:p}):", &engine);
        log::debug!("    Bands               = {:8}", bands);
        log::debug!("    Buffer Length       = {:8}", buffer_length);
        log::debug!("    History Length      = {:8}", stat_length);
        log::debug!("    Style Interval      = {:8?}", engine.cadence.period());
        log::debug!("    Italic Band         = {:8}", engine.selector.italic_band());
        log::debug!("    Channels            = {:8}", engine.channels.len());

        engine
    }

    /// Load the current channel and start the style cadence
    pub fn start(&mut self, now: time::Instant) -> Result<()> {
        self.cadence.start(now);
        self.load_current()
    }

    /// Stop the style cadence and the source
    pub fn stop(&mut self) {
        self.cadence.stop();
        self.source.stop();
        self.reader = None;
        for m in self.magnitudes.iter_mut() {
            *m = 0;
        }
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.cadence.is_running()
    }

    /// Switch to another channel
    ///
    /// Statistics of the previous channel are dropped before the new one's magnitudes are
    /// read.  An invalid request leaves everything as it was.  If the source fails to load
    /// the channel, the engine keeps running on silence.
    pub fn switch_channel(&mut self, request: ChannelRequest) -> Result<&channel::Channel> {
        self.channels.apply(request)?;
        self.load_current()?;

        Ok(self.channels.current())
    }

    fn load_current(&mut self) -> Result<()> {
        let channel = self.channels.current();
        log::info!("Channel: {} ({})", channel.title, channel.uri);

        self.source.stop();
        self.reader = None;
        self.stats.clear();
        for m in self.magnitudes.iter_mut() {
            *m = 0;
        }

        // Show the new title right away instead of waiting for the next style update
        self.typesetter
            .typeset(&self.selector.state().key(&channel.title));

        self.reader = Some(self.source.load(channel, self.magnitudes.len())?);

        Ok(())
    }

    /// Let the source synchronize with frame time `time`
    ///
    /// Returns false once the source has nothing more to deliver.
    pub fn sync(&mut self, time: f32) -> bool {
        self.source.sync(time)
    }

    /// Run one frame
    ///
    /// Takes a snapshot of the latest magnitudes and updates amplitudes, means, deltas and
    /// histories.  Returns the new style if the style cadence was due.
    pub fn tick(&mut self, now: time::Instant) -> Option<style::StyleState> {
        if let Some(ref mut reader) = self.reader {
            reader.snapshot_into(&mut self.magnitudes);
        }

        self.analyze();

        if self.cadence.poll(now) {
            Some(self.update_style())
        } else {
            None
        }
    }

    /// Update amplitudes, deltas and histories from the current snapshot
    ///
    /// Deltas are computed against the history *before* this frame's amplitudes are added.
    pub fn analyze(&mut self) {
        let amplitudes = self.aggregator.aggregate(&self.table, &self.magnitudes);

        self.deltas.update(&self.stats, amplitudes);
        self.stats.push_all(amplitudes);

        log::trace!("Amplitudes: {:?}", amplitudes);
    }

    /// Pick a new style from the latest deltas and hand it to the typesetter
    pub fn update_style(&mut self) -> style::StyleState {
        let state = self.selector.select(&self.table, &self.deltas);

        self.typesetter
            .typeset(&state.key(&self.channels.current().title));

        state
    }

    /// The magnitude snapshot of the last tick
    pub fn magnitudes(&self) -> &[analyzer::Magnitude] {
        &self.magnitudes
    }

    pub fn amplitudes(&self) -> &[Amplitude] {
        self.aggregator.amplitudes()
    }

    pub fn means(&self) -> &[Amplitude] {
        self.deltas.means()
    }

    pub fn deltas(&self) -> &[Amplitude] {
        self.deltas.deltas()
    }

    pub fn stats(&self) -> &analyzer::Statistics {
        &self.stats
    }

    pub fn stats_mut(&mut self) -> &mut analyzer::Statistics {
        &mut self.stats
    }

    pub fn table(&self) -> &analyzer::BandTable {
        &self.table
    }

    pub fn style(&self) -> style::StyleState {
        self.selector.state()
    }

    pub fn channel(&self) -> &channel::Channel {
        self.channels.current()
    }

    pub fn channels(&self) -> &channel::ChannelList {
        &self.channels
    }

    /// Number of band averages replaced by zero so far
    pub fn invalid_aggregates(&self) -> u64 {
        self.aggregator.invalid()
    }
}

impl Drop for Engine {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::Band;
    use std::{cell, rc};

    /// Source whose writer is handed to the test
    #[derive(Debug, Default)]
    struct Manual {
        writer: rc::Rc<cell::RefCell<Option<analyzer::MagnitudeWriter>>>,
        loads: rc::Rc<cell::RefCell<Vec<String>>>,
    }

    impl source::Source for Manual {
        fn load(
            &mut self,
            channel: &channel::Channel,
            length: usize,
        ) -> Result<analyzer::MagnitudeReader> {
            if channel.uri == "broken" {
                return Err(Error::source_failed(channel.title.clone(), "unsupported"));
            }

            let (writer, reader) = analyzer::magnitude_channel(length);
            *self.writer.borrow_mut() = Some(writer);
            self.loads.borrow_mut().push(channel.title.clone());
            Ok(reader)
        }

        fn stop(&mut self) {
            *self.writer.borrow_mut() = None;
        }
    }

    #[derive(Debug, Default)]
    struct Keys(rc::Rc<cell::RefCell<Vec<String>>>);

    impl style::Typesetter for Keys {
        fn typeset(&mut self, key: &style::GlyphKey) {
            self.0.borrow_mut().push(key.to_string());
        }
    }

    struct Rig {
        engine: Engine,
        writer: rc::Rc<cell::RefCell<Option<analyzer::MagnitudeWriter>>>,
        loads: rc::Rc<cell::RefCell<Vec<String>>>,
        keys: rc::Rc<cell::RefCell<Vec<String>>>,
        start: time::Instant,
    }

    impl Rig {
        fn publish(&self, data: &[analyzer::Magnitude]) {
            self.writer
                .borrow_mut()
                .as_mut()
                .expect("No channel loaded")
                .publish(data);
        }
    }

    fn rig(channels: Vec<channel::Channel>) -> Rig {
        let source = Manual::default();
        let keys = Keys::default();
        let (writer, loads, key_log) = (source.writer.clone(), source.loads.clone(), keys.0.clone());

        let mut engine = EngineBuilder::new()
            .buffer_length(16)
            .stat_length(128)
            .bands(vec![
                Band::new(0, 3, 900),
                Band::new(4, 7, 600),
                Band::new(8, 11, 300),
                Band::new(12, 15, 100),
            ])
            .channels(channels)
            .style_interval(time::Duration::from_millis(200))
            .italic_band(2)
            .build(Box::new(source), Box::new(keys))
            .unwrap();

        let start = time::Instant::now();
        engine.start(start).unwrap();

        Rig {
            engine,
            writer,
            loads,
            keys: key_log,
            start,
        }
    }

    fn cities() -> Vec<channel::Channel> {
        vec![
            channel::Channel::new("Doha", "a"),
            channel::Channel::new("Dublin", "b"),
            channel::Channel::new("Austin", "broken"),
        ]
    }

    fn ms(n: u64) -> time::Duration {
        time::Duration::from_millis(n)
    }

    #[test]
    fn test_start_typesets_title() {
        let r = rig(cities());

        assert!(r.engine.is_running());
        assert_eq!(*r.loads.borrow(), vec!["Doha"]);
        assert_eq!(*r.keys.borrow(), vec!["Dohan3"]);
    }

    #[test]
    fn test_tick_pipeline() {
        let mut r = rig(cities());

        // width is 3 for every band: 4 * 6 / 3 = 8
        r.publish(&[6; 16]);
        assert_eq!(r.engine.tick(r.start + ms(10)), None);

        assert_eq!(r.engine.magnitudes(), &[6; 16][..]);
        assert_eq!(r.engine.amplitudes(), &[8.0; 4][..]);
        // History was still at its seed when the deltas were taken
        assert_eq!(r.engine.means(), &[0.0; 4][..]);
        assert_eq!(r.engine.deltas(), &[-8.0; 4][..]);
        assert_eq!(r.engine.stats().mean(0), 8.0);
    }

    #[test]
    fn test_style_on_cadence() {
        let mut r = rig(cities());

        for _ in 0..10 {
            r.publish(&[3; 16]);
            r.engine.tick(r.start + ms(20));
        }

        // Band 1 drops to zero, band 2 gets louder
        let mut quiet = [3; 16];
        for m in quiet[4..8].iter_mut() {
            *m = 0;
        }
        for m in quiet[8..12].iter_mut() {
            *m = 9;
        }
        r.publish(&quiet);

        let state = r.engine.tick(r.start + ms(200)).unwrap();
        assert_eq!(state.weight, 600);
        assert_eq!(state.variant, style::Variant::Italic);
        assert_eq!(r.keys.borrow().last().unwrap(), "Dohai6");

        assert_eq!(r.engine.tick(r.start + ms(250)), None);
    }

    #[test]
    fn test_stale_buffer_reused() {
        let mut r = rig(cities());

        r.publish(&[12; 16]);
        r.engine.tick(r.start);
        r.engine.tick(r.start);

        assert_eq!(r.engine.magnitudes(), &[12; 16][..]);
        assert_eq!(r.engine.stats().history(0).len(), 2);
    }

    #[test]
    fn test_switch_clears() {
        let mut r = rig(cities());

        for v in 1..50 {
            r.publish(&[v; 16]);
            r.engine.tick(r.start);
        }

        let title = r.engine.switch_channel(ChannelRequest::Next).unwrap().title.clone();
        assert_eq!(title, "Dublin");
        assert_eq!(*r.loads.borrow(), vec!["Doha", "Dublin"]);
        assert_eq!(r.engine.magnitudes(), &[0; 16][..]);
        for b in 0..4 {
            assert_eq!(r.engine.stats().mean(b), 0.0);
        }

        r.engine.stats_mut().push(0, 11.0);
        assert_eq!(r.engine.stats().mean(0), 11.0);
    }

    #[test]
    fn test_switch_invalid() {
        let mut r = rig(cities());
        r.publish(&[5; 16]);
        r.engine.tick(r.start);

        assert!(r.engine.switch_channel(ChannelRequest::Select(7)).is_err());
        assert_eq!(r.engine.channel().title, "Doha");
        assert_eq!(r.engine.stats().history(0).len(), 1);
        assert!(!r.engine.stats().history(0).is_seeded());
    }

    #[test]
    fn test_switch_source_failure() {
        let mut r = rig(cities());

        match r.engine.switch_channel(ChannelRequest::Select(2)) {
            Err(Error::Source { ref title, .. }) if title == "Austin" => (),
            res => panic!("unexpected: {:?}", res.map(|c| c.title.clone())),
        }

        // Still ticking, on silence
        r.engine.tick(r.start + ms(300));
        assert_eq!(r.engine.channel().title, "Austin");
        assert_eq!(r.engine.amplitudes(), &[0.0; 4][..]);
    }

    #[test]
    fn test_stop() {
        let mut r = rig(cities());
        r.publish(&[6; 16]);
        r.engine.tick(r.start + ms(10));
        assert_eq!(r.engine.stats().history(0).len(), 1);

        r.engine.stop();

        assert!(!r.engine.is_running());
        assert!(r.writer.borrow().is_none());
        assert_eq!(r.engine.magnitudes(), &[0; 16][..]);

        assert_eq!(r.engine.tick(r.start + ms(1000)), None);
        assert_eq!(r.engine.amplitudes(), &[0.0; 4][..]);
        assert_eq!(r.engine.stats().history(0).len(), 1);
    }

    #[test]
    fn test_builder_errors() {
        let build = |b: &mut EngineBuilder| {
            b.buffer_length(16)
                .stat_length(8)
                .style_interval(ms(200))
                .build(Box::new(Manual::default()), Box::new(Keys::default()))
        };

        match build(
            EngineBuilder::new()
                .bands(vec![Band::new(0, 3, 100)])
                .channels(cities())
                .italic_band(2),
        ) {
            Err(Error::UnknownItalicBand { index: 2, bands: 1 }) => (),
            r => panic!("unexpected: {:?}", r),
        }

        match build(
            EngineBuilder::new()
                .bands(vec![Band::new(0, 3, 100)])
                .channels(vec![])
                .italic_band(0),
        ) {
            Err(Error::NoChannels) => (),
            r => panic!("unexpected: {:?}", r),
        }

        match build(
            EngineBuilder::new()
                .bands(vec![Band::new(0, 16, 100)])
                .channels(cities())
                .italic_band(0),
        ) {
            Err(Error::BandOutOfRange { .. }) => (),
            r => panic!("unexpected: {:?}", r),
        }

        match EngineBuilder::new()
            .buffer_length(16)
            .stat_length(0)
            .bands(vec![Band::new(0, 3, 100)])
            .channels(cities())
            .italic_band(0)
            .style_interval(ms(200))
            .build(Box::new(Manual::default()), Box::new(Keys::default()))
        {
            Err(Error::ZeroHistory) => (),
            r => panic!("unexpected: {:?}", r),
        }

        match EngineBuilder::new()
            .buffer_length(16)
            .stat_length(8)
            .bands(vec![Band::new(0, 3, 100)])
            .channels(cities())
            .italic_band(0)
            .style_interval(ms(0))
            .build(Box::new(Manual::default()), Box::new(Keys::default()))
        {
            Err(Error::ZeroInterval) => (),
            r => panic!("unexpected: {:?}", r),
        }
    }
}
