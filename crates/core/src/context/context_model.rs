//! Context and period models.

use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDateTime;
use oblib_taxonomy::PeriodType;

use crate::constants::FOREVER;
use crate::errors::{Error, Result};
use crate::utils::name_utils::{is_axis_name, qualify};
use crate::utils::time_utils::{format_timestamp, parse_timestamp};

/// Duration period: the open-ended `forever` or an explicit range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Duration {
    Forever,
    Range {
        start: NaiveDateTime,
        end: NaiveDateTime,
    },
}

impl Duration {
    /// Parses `forever` or `<start>/<end>`.
    pub fn parse(value: &str) -> Result<Self> {
        let value = value.trim();
        if value.eq_ignore_ascii_case(FOREVER) {
            return Ok(Duration::Forever);
        }
        let (start, end) = value.split_once('/').ok_or_else(|| {
            Error::Context(format!(
                "Duration '{}' must be '{}' or '<start>/<end>'",
                value, FOREVER
            ))
        })?;
        Ok(Duration::Range {
            start: parse_timestamp(start)?,
            end: parse_timestamp(end)?,
        })
    }
}

impl fmt::Display for Duration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Duration::Forever => f.write_str(FOREVER),
            Duration::Range { start, end } => {
                write!(f, "{}/{}", format_timestamp(start), format_timestamp(end))
            }
        }
    }
}

/// Exactly one period kind per context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Period {
    Instant(NaiveDateTime),
    Duration(Duration),
}

impl Period {
    pub fn period_type(&self) -> PeriodType {
        match self {
            Period::Instant(_) => PeriodType::Instant,
            Period::Duration(_) => PeriodType::Duration,
        }
    }

    pub fn is_forever(&self) -> bool {
        matches!(self, Period::Duration(Duration::Forever))
    }

    /// Parses a wire period string: `<instant>`, `<start>/<end>` or `forever`.
    pub fn parse(value: &str) -> Result<Self> {
        let value = value.trim();
        if value.contains('/') || value.eq_ignore_ascii_case(FOREVER) {
            Duration::parse(value).map(Period::Duration)
        } else {
            parse_timestamp(value).map(Period::Instant)
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Period::Instant(instant) => f.write_str(&format_timestamp(instant)),
            Period::Duration(duration) => duration.fmt(f),
        }
    }
}

/// Entity + period + axis values.
///
/// Equality ignores the id: two contexts are the same when entity, period and
/// the set of axis values match. The id is assigned once, by the table that
/// stores the context.
#[derive(Debug, Clone)]
pub struct Context {
    id: Option<String>,
    entity: Option<String>,
    period: Period,
    axes: BTreeMap<String, String>,
}

impl Context {
    pub fn builder() -> ContextBuilder {
        ContextBuilder::default()
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn entity(&self) -> Option<&str> {
        self.entity.as_deref()
    }

    pub fn period(&self) -> &Period {
        &self.period
    }

    pub fn instant(&self) -> Option<&NaiveDateTime> {
        match &self.period {
            Period::Instant(instant) => Some(instant),
            Period::Duration(_) => None,
        }
    }

    pub fn duration(&self) -> Option<&Duration> {
        match &self.period {
            Period::Duration(duration) => Some(duration),
            Period::Instant(_) => None,
        }
    }

    /// Axis values keyed by prefixed axis name.
    pub fn axes(&self) -> &BTreeMap<String, String> {
        &self.axes
    }

    pub fn axis_value(&self, axis: &str) -> Option<&str> {
        self.axes.get(&qualify(axis)).map(String::as_str)
    }

    pub(crate) fn axes_mut(&mut self) -> &mut BTreeMap<String, String> {
        &mut self.axes
    }

    pub(crate) fn assign_id(&mut self, id: String) {
        if self.id.is_none() {
            self.id = Some(id);
        }
    }
}

impl PartialEq for Context {
    fn eq(&self, other: &Self) -> bool {
        self.entity == other.entity && self.period == other.period && self.axes == other.axes
    }
}

impl Eq for Context {}

/// Partially specified context.
///
/// Used both to construct a [`Context`] and as the document's default-context
/// overrides, where every field is optional.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContextBuilder {
    instant: Option<NaiveDateTime>,
    duration: Option<Duration>,
    entity: Option<String>,
    axes: BTreeMap<String, String>,
}

impl ContextBuilder {
    pub fn instant(mut self, instant: NaiveDateTime) -> Self {
        self.instant = Some(instant);
        self
    }

    pub fn duration(mut self, start: NaiveDateTime, end: NaiveDateTime) -> Self {
        self.duration = Some(Duration::Range { start, end });
        self
    }

    pub fn forever(mut self) -> Self {
        self.duration = Some(Duration::Forever);
        self
    }

    pub fn period(mut self, period: Period) -> Self {
        match period {
            Period::Instant(instant) => self.instant = Some(instant),
            Period::Duration(duration) => self.duration = Some(duration),
        }
        self
    }

    pub fn entity(mut self, entity: impl Into<String>) -> Self {
        self.entity = Some(entity.into());
        self
    }

    /// Sets an axis value. Unprefixed names get the default prefix; names that
    /// do not end in `Axis` are rejected by [`build`](Self::build).
    pub fn axis(mut self, axis: impl AsRef<str>, value: impl Into<String>) -> Self {
        self.axes.insert(qualify(axis.as_ref()), value.into());
        self
    }

    /// Applies one keyword with a string value.
    ///
    /// Recognized keywords are `instant`, `duration` (`forever` or
    /// `<start>/<end>`), `entity`, and any name ending in `Axis`.
    pub fn keyword(self, key: &str, value: &str) -> Result<Self> {
        match key {
            "instant" => Ok(self.instant(parse_timestamp(value)?)),
            "duration" => {
                let duration = Duration::parse(value)?;
                Ok(Self {
                    duration: Some(duration),
                    ..self
                })
            }
            "entity" => Ok(self.entity(value)),
            _ if is_axis_name(key) => Ok(self.axis(key, value)),
            _ => Err(Error::Context(format!(
                "'{}' is not a period, entity or axis keyword",
                key
            ))),
        }
    }

    /// Builds from `(keyword, value)` pairs, see [`keyword`](Self::keyword).
    pub fn from_keywords<I, K, V>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        pairs
            .into_iter()
            .try_fold(Self::default(), |builder, (key, value)| {
                builder.keyword(key.as_ref(), value.as_ref())
            })
    }

    pub fn has_period(&self) -> bool {
        self.instant.is_some() || self.duration.is_some()
    }

    pub fn entity_value(&self) -> Option<&str> {
        self.entity.as_deref()
    }

    pub fn axis_values(&self) -> &BTreeMap<String, String> {
        &self.axes
    }

    pub fn is_empty(&self) -> bool {
        !self.has_period() && self.entity.is_none() && self.axes.is_empty()
    }

    /// Fills every unset field from `defaults`; values already set win.
    ///
    /// Default axes are only copied when `takes_axis` accepts them, so a
    /// default meant for one table never leaks into contexts of another.
    pub fn with_defaults(
        mut self,
        defaults: &ContextBuilder,
        takes_axis: impl Fn(&str) -> bool,
    ) -> Self {
        if self.entity.is_none() {
            self.entity = defaults.entity.clone();
        }
        if !self.has_period() {
            self.instant = defaults.instant;
            self.duration = defaults.duration;
        }
        for (axis, value) in &defaults.axes {
            if takes_axis(axis) {
                self.axes
                    .entry(axis.clone())
                    .or_insert_with(|| value.clone());
            }
        }
        self
    }

    /// Layers `update` on top of these overrides without clearing anything
    /// `update` leaves unset. A new period replaces the previous one.
    pub fn merge(&mut self, update: ContextBuilder) {
        let has_period = update.has_period();
        let ContextBuilder {
            instant,
            duration,
            entity,
            axes,
        } = update;
        if entity.is_some() {
            self.entity = entity;
        }
        if has_period {
            self.instant = instant;
            self.duration = duration;
        }
        self.axes.extend(axes);
    }

    pub fn build(self) -> Result<Context> {
        let period = match (self.instant, self.duration) {
            (Some(instant), None) => Period::Instant(instant),
            (None, Some(duration)) => Period::Duration(duration),
            (None, None) => {
                return Err(Error::Context(
                    "A context needs either an instant or a duration".to_string(),
                ))
            }
            (Some(_), Some(_)) => {
                return Err(Error::Context(
                    "A context cannot have both an instant and a duration".to_string(),
                ))
            }
        };

        if let Some(key) = self.axes.keys().find(|key| !is_axis_name(key)) {
            return Err(Error::Context(format!("'{}' is not an axis", key)));
        }

        Ok(Context {
            id: None,
            entity: self.entity,
            period,
            axes: self.axes,
        })
    }
}

impl From<Context> for ContextBuilder {
    fn from(context: Context) -> Self {
        let (instant, duration) = match context.period {
            Period::Instant(instant) => (Some(instant), None),
            Period::Duration(duration) => (None, Some(duration)),
        };
        Self {
            instant,
            duration,
            entity: context.entity,
            axes: context.axes,
        }
    }
}

impl From<&Context> for ContextBuilder {
    fn from(context: &Context) -> Self {
        context.clone().into()
    }
}
