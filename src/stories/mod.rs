//! Named demo entries for the chart widgets.

mod builtin;
mod catalog;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::api::ChartProps;
use crate::core::Point;
use crate::error::ChartResult;
use crate::render::RenderFrame;

pub use builtin::{bar_stack_standard, custom_xy_chart_standard, default_catalog, welcome};
pub use catalog::{StoryCatalog, compare_story_ids};

/// Size of the container a story renders into.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StorySize {
    pub width: f64,
    pub height: f64,
}

impl StorySize {
    #[must_use]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn props(self) -> ChartProps {
        ChartProps::new(self.width, self.height)
    }
}

impl Default for StorySize {
    fn default() -> Self {
        Self::new(800.0, 500.0)
    }
}

/// Inputs for one story render.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StoryArgs {
    pub props: ChartProps,
    /// Chart-local pointer position replayed before rendering.
    pub pointer: Option<Point>,
}

pub type StoryRenderFn = fn(&StoryArgs) -> ChartResult<Option<RenderFrame>>;

#[derive(Clone)]
pub struct Story {
    title: String,
    name: String,
    id: String,
    size: StorySize,
    render: StoryRenderFn,
}

impl Story {
    #[must_use]
    pub fn new(title: impl Into<String>, name: impl Into<String>, render: StoryRenderFn) -> Self {
        let title = title.into();
        let name = name.into();
        let id = story_id(&title, &name);
        Self {
            title,
            name,
            id,
            size: StorySize::default(),
            render,
        }
    }

    #[must_use]
    pub fn with_size(mut self, size: StorySize) -> Self {
        self.size = size;
        self
    }

    /// Grouping title, e.g. `bar-stack-example/dynamic`.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Id prefix shared by every story of this title.
    #[must_use]
    pub fn kind_id(&self) -> &str {
        self.id.split_once("--").map_or(self.id.as_str(), |(kind, _)| kind)
    }

    #[must_use]
    pub fn size(&self) -> StorySize {
        self.size
    }

    /// First segment of the title.
    #[must_use]
    pub fn root(&self) -> &str {
        self.title.split('/').next().unwrap_or(&self.title)
    }

    pub fn render(&self, args: &StoryArgs) -> ChartResult<Option<RenderFrame>> {
        (self.render)(args)
    }

    /// Renders at the story's own size.
    pub fn render_default(&self) -> ChartResult<Option<RenderFrame>> {
        self.render(&StoryArgs {
            props: self.size.props(),
            pointer: None,
        })
    }
}

impl fmt::Debug for Story {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Story")
            .field("title", &self.title)
            .field("name", &self.name)
            .field("id", &self.id)
            .field("size", &self.size)
            .finish_non_exhaustive()
    }
}

/// `kebab(title)--kebab(name)`.
#[must_use]
pub fn story_id(title: &str, name: &str) -> String {
    format!("{}--{}", kebab_case(title), kebab_case(name))
}

/// Lowercases and joins alphanumeric runs with `-`.
#[must_use]
pub fn kebab_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut pending_dash = false;
    for ch in text.chars() {
        if ch.is_alphanumeric() {
            if pending_dash && !out.is_empty() {
                out.push('-');
            }
            pending_dash = false;
            out.extend(ch.to_lowercase());
        } else {
            pending_dash = true;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_kebab_cased() {
        assert_eq!(story_id("Welcome", "To Storybook"), "welcome--to-storybook");
        assert_eq!(
            story_id("bar-stack-example/dynamic", "Standard"),
            "bar-stack-example-dynamic--standard"
        );
    }
}
