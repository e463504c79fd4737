use std::cmp::Ordering;

use indexmap::IndexMap;
use tracing::debug;

use crate::core::Point;
use crate::error::{ChartError, ChartResult};
use crate::render::RenderFrame;
use crate::stories::{Story, StoryArgs};

use crate::api::ChartProps;

/// Registry of stories keyed by id, in registration order.
#[derive(Debug, Clone, Default)]
pub struct StoryCatalog {
    stories: IndexMap<String, Story>,
    show_roots: bool,
}

impl StoryCatalog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_show_roots(mut self, show_roots: bool) -> Self {
        self.show_roots = show_roots;
        self
    }

    #[must_use]
    pub fn show_roots(&self) -> bool {
        self.show_roots
    }

    pub fn register(&mut self, story: Story) -> ChartResult<()> {
        if self.stories.contains_key(story.id()) {
            return Err(ChartError::InvalidData(format!(
                "story `{}` is already registered",
                story.id()
            )));
        }
        debug!(id = story.id(), "registered story");
        self.stories.insert(story.id().to_owned(), story);
        Ok(())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.stories.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stories.is_empty()
    }

    pub fn get(&self, id: &str) -> ChartResult<&Story> {
        self.stories
            .get(id)
            .ok_or_else(|| ChartError::UnknownStory(id.to_owned()))
    }

    /// Stories in display order.
    ///
    /// Stories sharing a title keep their registration order; all other pairs
    /// compare the kind part of their ids with numeric-aware collation.
    #[must_use]
    pub fn sorted(&self) -> Vec<&Story> {
        let mut stories: Vec<&Story> = self.stories.values().collect();
        stories.sort_by(|a, b| {
            compare_story_ids(a.kind_id(), b.kind_id()).then_with(|| a.title().cmp(b.title()))
        });
        stories
    }

    /// Sorted stories grouped under their root segment when roots are shown,
    /// otherwise a single unnamed group.
    #[must_use]
    pub fn groups(&self) -> IndexMap<String, Vec<&Story>> {
        let mut groups: IndexMap<String, Vec<&Story>> = IndexMap::new();
        for story in self.sorted() {
            let key = if self.show_roots {
                story.root().to_owned()
            } else {
                String::new()
            };
            groups.entry(key).or_default().push(story);
        }
        groups
    }

    /// Renders a story, with `props` defaulting to the story's own size.
    pub fn render(
        &self,
        id: &str,
        props: Option<ChartProps>,
        pointer: Option<Point>,
    ) -> ChartResult<Option<RenderFrame>> {
        let story = self.get(id)?;
        let args = StoryArgs {
            props: props.unwrap_or_else(|| story.size().props()),
            pointer,
        };
        debug!(id, width = args.props.width, height = args.props.height, "rendering story");
        story.render(&args)
    }
}

/// Case-insensitive comparison that orders digit runs by numeric value.
#[must_use]
pub fn compare_story_ids(left: &str, right: &str) -> Ordering {
    let mut left_chars = left.chars().peekable();
    let mut right_chars = right.chars().peekable();

    loop {
        match (left_chars.peek().copied(), right_chars.peek().copied()) {
            (None, None) => return left.cmp(right),
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(l), Some(r)) if l.is_ascii_digit() && r.is_ascii_digit() => {
                let left_run = take_digits(&mut left_chars);
                let right_run = take_digits(&mut right_chars);
                let ordering = compare_digit_runs(&left_run, &right_run);
                if ordering != Ordering::Equal {
                    return ordering;
                }
            }
            (Some(l), Some(r)) => {
                let ordering = l.to_lowercase().cmp(r.to_lowercase());
                if ordering != Ordering::Equal {
                    return ordering;
                }
                left_chars.next();
                right_chars.next();
            }
        }
    }
}

fn take_digits(chars: &mut std::iter::Peekable<std::str::Chars<'_>>) -> String {
    let mut run = String::new();
    while let Some(ch) = chars.next_if(char::is_ascii_digit) {
        run.push(ch);
    }
    run
}

fn compare_digit_runs(left: &str, right: &str) -> Ordering {
    let left = left.trim_start_matches('0');
    let right = right.trim_start_matches('0');
    left.len().cmp(&right.len()).then_with(|| left.cmp(right))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digit_runs_compare_numerically() {
        assert_eq!(compare_story_ids("chart-2--a", "chart-10--a"), Ordering::Less);
        assert_eq!(compare_story_ids("Chart--a", "chart--b"), Ordering::Less);
        assert_eq!(compare_story_ids("a", "a"), Ordering::Equal);
    }
}
