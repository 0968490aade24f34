/// The single time source of a scene, advanced once per tick.
///
/// Looping the whole scene (restarting every clip from zero after a fixed
/// time) is a property of the clock, not of any track.
#[derive(Debug, Clone)]
pub struct AnimationClock {
    pub speed: f64,
    pub loop_style: Option<ClockLoopStyle>,
    // will change with ping-pong as each end is hit
    pub play_direction: PlayDirection,
    duration: Option<f64>,
    state: AnimationState,
    time: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationState {
    Playing,
    Paused,
    Ended,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ClockLoopStyle {
    Loop,
    PingPong,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayDirection {
    Forward,
    Backward,
}

impl Default for AnimationClock {
    fn default() -> Self {
        Self::new(None)
    }
}

impl AnimationClock {
    /// A playing clock. Without a duration it runs forever.
    pub fn new(duration: Option<f64>) -> Self {
        Self {
            speed: 1.0,
            loop_style: None,
            play_direction: PlayDirection::Forward,
            duration: duration.filter(|duration| duration.is_finite() && *duration > 0.0),
            state: AnimationState::Playing,
            time: 0.0,
        }
    }

    /// A clock that restarts at zero every `duration` seconds.
    pub fn looping(duration: f64) -> Self {
        let mut clock = Self::new(Some(duration));
        clock.loop_style = Some(ClockLoopStyle::Loop);
        clock
    }

    pub fn time(&self) -> f64 {
        self.time
    }

    pub fn duration(&self) -> Option<f64> {
        self.duration
    }

    pub fn state(&self) -> AnimationState {
        self.state
    }

    pub fn set_time(&mut self, time: f64) {
        self.time = match self.duration {
            Some(duration) => time.clamp(0.0, duration),
            None => time.max(0.0),
        };
    }

    pub fn play(&mut self) {
        if self.state == AnimationState::Ended {
            self.time = match self.play_direction {
                PlayDirection::Forward => 0.0,
                PlayDirection::Backward => self.duration.unwrap_or(0.0),
            };
        }
        self.state = AnimationState::Playing;
    }

    pub fn pause(&mut self) {
        if self.state == AnimationState::Playing {
            self.state = AnimationState::Paused;
        }
    }

    pub fn update(&mut self, global_time_delta: f64) {
        if self.state != AnimationState::Playing {
            return;
        }

        let local_time_delta = global_time_delta * self.speed;

        let Some(duration) = self.duration else {
            self.time = match self.play_direction {
                PlayDirection::Forward => self.time + local_time_delta,
                PlayDirection::Backward => (self.time - local_time_delta).max(0.0),
            };
            return;
        };

        match self.play_direction {
            PlayDirection::Forward => {
                self.time += local_time_delta;
                if self.time >= duration {
                    match self.loop_style {
                        Some(ClockLoopStyle::Loop) => {
                            self.time = self.time.rem_euclid(duration);
                        }
                        Some(ClockLoopStyle::PingPong) => {
                            self.play_direction = PlayDirection::Backward;
                            self.time = duration;
                        }
                        None => {
                            self.time = duration;
                            self.state = AnimationState::Ended;
                        }
                    }
                }
            }

            PlayDirection::Backward => {
                self.time -= local_time_delta;
                if self.time <= 0.0 {
                    match self.loop_style {
                        Some(ClockLoopStyle::Loop) => {
                            self.time = duration - (-self.time).rem_euclid(duration);
                        }
                        Some(ClockLoopStyle::PingPong) => {
                            self.play_direction = PlayDirection::Forward;
                            self.time = 0.0;
                        }
                        None => {
                            self.time = 0.0;
                            self.state = AnimationState::Ended;
                        }
                    }
                }
            }
        }
    }
}
