//! Performance instrumentation
//!
//! Frame timing for the status bar and the optional puffin profiler server.
//! Scopes themselves are marked with `profiling::scope!` where the work is.

/// Rolling frame time tracker
pub struct FrameTimer {
    last_frame: std::time::Instant,
    frame_times: [f32; 60],
    frame_idx: usize,
}

impl FrameTimer {
    pub fn new() -> Self {
        Self {
            last_frame: std::time::Instant::now(),
            frame_times: [16.67; 60], // Initialize to 60fps
            frame_idx: 0,
        }
    }

    /// Call at start of each frame
    pub fn begin_frame(&mut self) {
        profiling::finish_frame!();

        let now = std::time::Instant::now();
        let dt = now.duration_since(self.last_frame).as_secs_f32() * 1000.0;
        self.last_frame = now;

        self.frame_times[self.frame_idx] = dt;
        self.frame_idx = (self.frame_idx + 1) % self.frame_times.len();
    }

    /// Get average frame time in ms
    pub fn avg_frame_ms(&self) -> f32 {
        self.frame_times.iter().sum::<f32>() / self.frame_times.len() as f32
    }

    /// Get estimated FPS
    pub fn fps(&self) -> f32 {
        1000.0 / self.avg_frame_ms()
    }
}

impl Default for FrameTimer {
    fn default() -> Self {
        Self::new()
    }
}

/// Start the puffin HTTP server; keep the returned handle alive while profiling
#[cfg(feature = "profile-with-puffin")]
pub fn start_puffin_server() -> Option<puffin_http::Server> {
    puffin::set_scopes_on(true);
    let addr = format!("127.0.0.1:{}", puffin_http::DEFAULT_PORT);
    match puffin_http::Server::new(&addr) {
        Ok(server) => {
            log::info!("Puffin profiler listening on {}", addr);
            Some(server)
        }
        Err(e) => {
            log::warn!("Failed to start puffin server: {}", e);
            None
        }
    }
}
