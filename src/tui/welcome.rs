//! Welcome splash sequence.
//!
//! The splash is a fixed script of cues on one clock:
//!
//! | offset  | cue                                             |
//! |---------|-------------------------------------------------|
//! | 0 ms    | icon bounces in                                 |
//! | 600 ms  | title scales in, then pulses                    |
//! | 1200 ms | subtitle slides up                              |
//! | 1800 ms | loading dots fade in and cycle                  |
//! | 5800 ms | welcome fades out                               |
//! | +400 ms | navigation slides in                            |
//! | +1000ms | navigation ready, welcome elements hidden       |
//!
//! [`WelcomeSequence::tick`] is called with the elapsed time every frame.
//! Dropping the sequence cancels whatever has not fired yet.

use super::timeline::{Easing, Repeat, Timeline, Tween};
use std::time::Duration;
use tracing::{debug, info, instrument};

/// On-screen parts of the splash.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::EnumIter)]
pub enum Element {
    /// Game icon.
    Icon,
    /// "Welcome" title.
    Title,
    /// Subtitle under the title.
    Subtitle,
    /// Animated "Loading..." text.
    Loading,
    /// Mode tabs that take over once the splash ends.
    Navigation,
}

impl Element {
    fn slot(self) -> usize {
        match self {
            Element::Icon => 0,
            Element::Title => 1,
            Element::Subtitle => 2,
            Element::Loading => 3,
            Element::Navigation => 4,
        }
    }
}

/// Animatable property of an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Property {
    /// Opacity, 0 to 1.
    Alpha,
    /// Horizontal scale.
    ScaleX,
    /// Vertical scale.
    ScaleY,
    /// Rotation in degrees.
    Rotation,
    /// Downward offset in layout units.
    TranslationY,
}

/// Visual state of one element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElementState {
    /// Opacity, 0 to 1.
    pub alpha: f32,
    /// Horizontal scale.
    pub scale_x: f32,
    /// Vertical scale.
    pub scale_y: f32,
    /// Rotation in degrees.
    pub rotation: f32,
    /// Downward offset in layout units.
    pub translation_y: f32,
    /// Whether the element takes part in layout at all.
    pub visible: bool,
}

impl ElementState {
    fn set(&mut self, property: Property, value: f32) {
        match property {
            Property::Alpha => self.alpha = value,
            Property::ScaleX => self.scale_x = value,
            Property::ScaleY => self.scale_y = value,
            Property::Rotation => self.rotation = value,
            Property::TranslationY => self.translation_y = value,
        }
    }
}

impl Default for ElementState {
    fn default() -> Self {
        Self {
            alpha: 1.0,
            scale_x: 1.0,
            scale_y: 1.0,
            rotation: 0.0,
            translation_y: 0.0,
            visible: true,
        }
    }
}

/// Scripted cues of the splash.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WelcomeCue {
    /// Icon bounce, fade and spin.
    IconIn,
    /// Title fade, overshoot scale and pulse.
    TitleIn,
    /// Subtitle fade and slide.
    SubtitleIn,
    /// Loading text fade and dot cycle.
    LoadingIn,
    /// Stop the dots and fade the welcome out.
    BeginTransition,
    /// Reveal the navigation bar.
    SlideInNavigation,
    /// Hand over to the game screens.
    SetupNavigation,
}

const ICON_IN_AT: Duration = Duration::from_millis(0);
const TITLE_IN_AT: Duration = Duration::from_millis(600);
const SUBTITLE_IN_AT: Duration = Duration::from_millis(1200);
const LOADING_IN_AT: Duration = Duration::from_millis(1800);
const TRANSITION_AT: Duration = Duration::from_millis(5800);
const NAV_SLIDE_DELAY: Duration = Duration::from_millis(400);
const NAV_SETUP_DELAY: Duration = Duration::from_millis(1000);

const LOADING_FRAMES: [&str; 4] = ["Loading", "Loading.", "Loading..", "Loading..."];

/// A running property animation.
#[derive(Debug, Clone)]
struct Animation {
    element: Element,
    property: Property,
    tween: Tween,
}

/// State machine for the welcome splash.
#[derive(Debug)]
pub struct WelcomeSequence {
    timeline: Timeline<WelcomeCue>,
    animations: Vec<Animation>,
    dots: Option<Tween>,
    states: [ElementState; 5],
    loading_text: &'static str,
    finished: bool,
}

impl WelcomeSequence {
    /// Total length of the script.
    pub const DURATION: Duration = Duration::from_millis(6800);

    /// Creates the sequence with every element hidden and the cues queued.
    #[instrument]
    pub fn new() -> Self {
        let mut states = [ElementState::default(); 5];

        let icon = &mut states[Element::Icon.slot()];
        icon.alpha = 0.0;
        icon.scale_x = 0.1;
        icon.scale_y = 0.1;
        icon.rotation = -180.0;

        let title = &mut states[Element::Title.slot()];
        title.alpha = 0.0;
        title.scale_x = 0.3;
        title.scale_y = 0.3;

        let subtitle = &mut states[Element::Subtitle.slot()];
        subtitle.alpha = 0.0;
        subtitle.translation_y = 100.0;

        states[Element::Loading.slot()].alpha = 0.0;

        let nav = &mut states[Element::Navigation.slot()];
        nav.alpha = 0.0;
        nav.translation_y = 200.0;
        nav.visible = false;

        let mut timeline = Timeline::new();
        timeline.schedule(ICON_IN_AT, WelcomeCue::IconIn);
        timeline.schedule(TITLE_IN_AT, WelcomeCue::TitleIn);
        timeline.schedule(SUBTITLE_IN_AT, WelcomeCue::SubtitleIn);
        timeline.schedule(LOADING_IN_AT, WelcomeCue::LoadingIn);
        timeline.schedule(TRANSITION_AT, WelcomeCue::BeginTransition);

        Self {
            timeline,
            animations: Vec::new(),
            dots: None,
            states,
            loading_text: LOADING_FRAMES[0],
            finished: false,
        }
    }

    /// Advances to `now` (time since the splash started).
    ///
    /// Returns true once navigation is ready.
    #[instrument(skip(self))]
    pub fn tick(&mut self, now: Duration) -> bool {
        // Cues may schedule follow-ups that are already due.
        loop {
            let due = self.timeline.due(now);
            if due.is_empty() {
                break;
            }
            for (at, cue) in due {
                self.fire(at, cue);
            }
        }

        for animation in &self.animations {
            if let Some(value) = animation.tween.value_at(now) {
                self.states[animation.element.slot()].set(animation.property, value);
            }
        }
        self.animations.retain(|a| !a.tween.is_finished(now));

        if let Some(dots) = &self.dots
            && let Some(value) = dots.value_at(now)
        {
            let frame = (value.max(0.0) as usize).min(LOADING_FRAMES.len() - 1);
            self.loading_text = LOADING_FRAMES[frame];
        }

        self.finished
    }

    fn animate(&mut self, element: Element, property: Property, tween: Tween) {
        debug!(?element, ?property, easing = %tween.easing(), "Animation started");
        self.animations.push(Animation {
            element,
            property,
            tween,
        });
    }

    fn fire(&mut self, at: Duration, cue: WelcomeCue) {
        debug!(?cue, at_ms = at.as_millis() as u64, "Welcome cue");
        let ms = Duration::from_millis;
        use Easing::*;
        use Element::*;
        use Property::*;

        match cue {
            WelcomeCue::IconIn => {
                self.animate(Icon, ScaleX, Tween::new(at, ms(800), [0.1, 1.2, 1.0], Bounce));
                self.animate(Icon, ScaleY, Tween::new(at, ms(800), [0.1, 1.2, 1.0], Bounce));
                self.animate(Icon, Alpha, Tween::new(at, ms(600), [0.0, 1.0], AccelerateDecelerate));
                self.animate(Icon, Rotation, Tween::new(at, ms(800), [-180.0, 0.0], Overshoot));
            }
            WelcomeCue::TitleIn => {
                self.animate(Title, Alpha, Tween::new(at, ms(800), [0.0, 1.0], AccelerateDecelerate));
                self.animate(Title, ScaleX, Tween::new(at, ms(800), [0.3, 1.1, 1.0], Overshoot));
                self.animate(Title, ScaleY, Tween::new(at, ms(800), [0.3, 1.1, 1.0], Overshoot));
                self.animate(
                    Title,
                    ScaleX,
                    Tween::new(at + ms(800), ms(1000), [1.0, 1.05, 1.0], AccelerateDecelerate)
                        .repeat(Repeat::Reverse),
                );
            }
            WelcomeCue::SubtitleIn => {
                self.animate(Subtitle, Alpha, Tween::new(at, ms(800), [0.0, 1.0], AccelerateDecelerate));
                self.animate(
                    Subtitle,
                    TranslationY,
                    Tween::new(at, ms(800), [100.0, -20.0, 0.0], Overshoot),
                );
            }
            WelcomeCue::LoadingIn => {
                self.animate(Loading, Alpha, Tween::new(at, ms(400), [0.0, 1.0], AccelerateDecelerate));
                self.dots = Some(
                    Tween::new(at, ms(1000), [0.0, 3.0], AccelerateDecelerate)
                        .repeat(Repeat::Restart),
                );
            }
            WelcomeCue::BeginTransition => {
                self.dots = None;
                // The pulse would fight the scale-down below.
                self.animations.retain(|a| !a.tween.is_infinite());

                self.animate(Title, Alpha, Tween::new(at, ms(600), [1.0, 0.0], AccelerateDecelerate));
                self.animate(Subtitle, Alpha, Tween::new(at, ms(600), [1.0, 0.0], AccelerateDecelerate));
                self.animate(Icon, Alpha, Tween::new(at, ms(600), [1.0, 0.0], AccelerateDecelerate));
                self.animate(Loading, Alpha, Tween::new(at, ms(400), [1.0, 0.0], AccelerateDecelerate));
                self.animate(Title, ScaleX, Tween::new(at, ms(600), [1.0, 0.8], AccelerateDecelerate));

                self.timeline
                    .schedule(at + NAV_SLIDE_DELAY, WelcomeCue::SlideInNavigation);
                self.timeline
                    .schedule(at + NAV_SETUP_DELAY, WelcomeCue::SetupNavigation);
            }
            WelcomeCue::SlideInNavigation => {
                self.states[Navigation.slot()].visible = true;
                self.animate(Navigation, Alpha, Tween::new(at, ms(800), [0.0, 1.0], AccelerateDecelerate));
                self.animate(
                    Navigation,
                    TranslationY,
                    Tween::new(at, ms(800), [200.0, 0.0], Overshoot),
                );
            }
            WelcomeCue::SetupNavigation => {
                for element in [Icon, Title, Subtitle, Loading] {
                    self.states[element.slot()].visible = false;
                }
                self.finished = true;
                info!("Welcome sequence finished");
            }
        }
    }

    /// Current state of `element`.
    pub fn state(&self, element: Element) -> ElementState {
        self.states[element.slot()]
    }

    /// Current loading-dots frame.
    pub fn loading_text(&self) -> &'static str {
        self.loading_text
    }

    /// Returns true once navigation is ready.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Cues not yet fired.
    pub fn pending_cues(&self) -> usize {
        self.timeline.pending()
    }

    /// Animations still running.
    pub fn running_animations(&self) -> usize {
        self.animations.len() + usize::from(self.dots.is_some())
    }

    /// Drops every pending cue and running animation.
    ///
    /// Returns the number of cues that will now never fire.
    #[instrument(skip(self))]
    pub fn cancel(&mut self) -> usize {
        let dropped = self.timeline.cancel();
        self.animations.clear();
        self.dots = None;
        dropped
    }
}

impl Default for WelcomeSequence {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for WelcomeSequence {
    fn drop(&mut self) {
        if !self.timeline.is_empty() || !self.animations.is_empty() {
            let dropped = self.cancel();
            debug!(dropped, "Welcome sequence torn down early");
        }
    }
}
