//! Channels
use crate::error::{Error, Result};

/// A named audio/video stream
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Channel {
    pub title: String,
    pub uri: String,
}

impl Channel {
    pub fn new<S1: Into<String>, S2: Into<String>>(title: S1, uri: S2) -> Channel {
        Channel {
            title: title.into(),
            uri: uri.into(),
        }
    }
}

/// Channel switch requests
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelRequest {
    Next,
    Previous,
    Random,
    Select(usize),
}

/// The built-in city webcams
pub fn default_channels() -> Vec<Channel> {
    [
        ("Cleveland", "https://video3.earthcam.com/fecnetwork/8939.flv/playlist.m3u8"),
        ("Chicago", "https://video3.earthcam.com/fecnetwork/5187.flv/playlist.m3u8"),
        ("Dublin", "https://video3.earthcam.com/fecnetwork/4054.flv/playlist.m3u8"),
        ("New York", "https://video3.earthcam.com/fecnetwork/4017timessquare.flv/playlist.m3u8"),
        ("Austin", "https://video3.earthcam.com/fecnetwork/paradiseon6.flv/playlist.m3u8"),
        ("Doha", "https://video3.earthcam.com/fecnetwork/7947.flv/playlist.m3u8"),
        ("Las Vegas", "https://video3.earthcam.com/fecnetwork/eclasvegas.flv/playlist.m3u8"),
        ("Columbus", "https://video3.earthcam.com/fecnetwork/6427.flv/playlist.m3u8"),
        ("Belmont", "https://video3.earthcam.com/fecnetwork/5324.flv/playlist.m3u8"),
        ("San Francisco", "https://video3.earthcam.com/fecnetwork/6961.flv/playlist.m3u8"),
    ]
    .iter()
    .map(|(t, u)| Channel::new(*t, *u))
    .collect()
}

/// Ordered channel list with a cursor
#[derive(Debug, Clone)]
pub struct ChannelList {
    channels: Vec<Channel>,
    current: usize,
}

impl ChannelList {
    pub fn new(channels: Vec<Channel>) -> Result<ChannelList> {
        if channels.is_empty() {
            return Err(Error::NoChannels);
        }

        Ok(ChannelList {
            channels,
            current: 0,
        })
    }

    pub fn current(&self) -> &Channel {
        &self.channels[self.current]
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.channels.len()
    }

    pub fn iter<'a>(&'a self) -> std::slice::Iter<'a, Channel> {
        self.channels.iter()
    }

    /// Move the cursor and return the channel it lands on
    ///
    /// `Next` and `Previous` wrap around.  Only `Select` with an index out of range fails,
    /// and it leaves the cursor where it was.
    pub fn apply(&mut self, request: ChannelRequest) -> Result<&Channel> {
        let len = self.channels.len();

        self.current = match request {
            ChannelRequest::Next => (self.current + 1) % len,
            ChannelRequest::Previous => (self.current + len - 1) % len,
            ChannelRequest::Random => {
                use rand::Rng;
                rand::thread_rng().gen_range(0, len)
            }
            ChannelRequest::Select(i) if i < len => i,
            ChannelRequest::Select(i) => {
                return Err(Error::UnknownChannel {
                    index: i,
                    channels: len,
                })
            }
        };

        Ok(self.current())
    }
}
