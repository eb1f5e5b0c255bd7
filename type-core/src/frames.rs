use crate::{analyzer, channel, engine, style};
use std::{cell, collections, rc, time};

/// What the drawing code gets to see of a frame
#[derive(Debug, Clone, Default)]
pub struct FrameInfo {
    pub magnitudes: Vec<analyzer::Magnitude>,
    pub amplitudes: Vec<analyzer::Amplitude>,
    pub means: Vec<analyzer::Amplitude>,
    pub deltas: Vec<analyzer::Amplitude>,
    pub style: Option<style::StyleState>,
    /// Set if the style was updated during this frame
    pub restyled: bool,
    pub title: String,
}

impl FrameInfo {
    fn fill_from(&mut self, engine: &engine::Engine, restyled: bool) {
        fn copy<T: Copy>(dst: &mut Vec<T>, src: &[T]) {
            dst.clear();
            dst.extend_from_slice(src);
        }

        copy(&mut self.magnitudes, engine.magnitudes());
        copy(&mut self.amplitudes, engine.amplitudes());
        copy(&mut self.means, engine.means());
        copy(&mut self.deltas, engine.deltas());

        self.style = Some(engine.style());
        self.restyled = restyled;

        if self.title != engine.channel().title {
            self.title.clear();
            self.title.push_str(&engine.channel().title);
        }
    }
}

type Requests = rc::Rc<cell::RefCell<collections::VecDeque<channel::ChannelRequest>>>;

#[derive(Debug)]
pub struct Frame {
    pub time: f32,
    pub frame: usize,
    info: rc::Rc<cell::RefCell<FrameInfo>>,
    requests: Requests,
}

impl Frame {
    pub fn lock_info<F, O>(&self, f: F) -> O
    where
        F: FnOnce(&FrameInfo) -> O,
    {
        f(&self.info.borrow())
    }

    /// Queue a channel switch
    ///
    /// It is carried out at the start of the next frame, before any magnitudes are read.
    pub fn request(&self, request: channel::ChannelRequest) {
        self.requests.borrow_mut().push_back(request);
    }
}

#[derive(Debug)]
pub struct Frames {
    engine: engine::Engine,
    info: rc::Rc<cell::RefCell<FrameInfo>>,
    requests: Requests,
}

impl Frames {
    /// Start `engine` and wrap it for frame-by-frame driving
    pub fn new(mut engine: engine::Engine) -> crate::Result<Frames> {
        if !engine.is_running() {
            engine.start(time::Instant::now())?;
        }

        Ok(Frames {
            engine,
            info: Default::default(),
            requests: Default::default(),
        })
    }

    /// Queue a channel switch for the next frame
    pub fn request(&self, request: channel::ChannelRequest) {
        self.requests.borrow_mut().push_back(request);
    }

    pub fn engine(&self) -> &engine::Engine {
        &self.engine
    }

    /// Stop the engine and hand it back
    pub fn finish(mut self) -> engine::Engine {
        self.engine.stop();
        self.engine
    }

    pub fn iter<'a>(&'a mut self) -> FramesIter<'a> {
        FramesIter {
            frames: self,
            start_time: time::Instant::now(),
            frame: 0,
        }
    }
}

#[derive(Debug)]
pub struct FramesIter<'a> {
    frames: &'a mut Frames,
    start_time: time::Instant,
    frame: usize,
}

impl<'a> Iterator for FramesIter<'a> {
    type Item = Frame;

    fn next(&mut self) -> Option<Self::Item> {
        let now = time::Instant::now();
        let time = (now - self.start_time).as_secs_f32();
        let engine = &mut self.frames.engine;

        loop {
            // Release the queue before switching
            let request = self.frames.requests.borrow_mut().pop_front();
            let request = match request {
                Some(r) => r,
                None => break,
            };

            if let Err(e) = engine.switch_channel(request) {
                log::error!("Channel switch ({:?}) failed: {}", request, e);
            }
        }

        if !engine.sync(time) {
            return None;
        }

        let restyled = engine.tick(now).is_some();
        self.frames
            .info
            .borrow_mut()
            .fill_from(engine, restyled);

        let frame = self.frame;
        self.frame += 1;

        log::trace!("Frame: {:7}@{:.3}", frame, time);

        Some(Frame {
            time,
            frame,
            info: self.frames.info.clone(),
            requests: self.frames.requests.clone(),
        })
    }
}
