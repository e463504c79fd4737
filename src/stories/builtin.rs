use crate::api::{BarStackChart, ChartTheme, TimeSeriesChart};
use crate::error::ChartResult;
use crate::interaction::PointerInput;
use crate::render::{Color, Primitive, RectPrimitive, RenderFrame, TextHAlign, TextPrimitive};
use crate::stories::{Story, StoryArgs, StoryCatalog};

/// Catalog with the welcome page and both chart stories, roots shown.
pub fn default_catalog() -> ChartResult<StoryCatalog> {
    let mut catalog = StoryCatalog::new().with_show_roots(true);
    catalog.register(welcome())?;
    catalog.register(bar_stack_standard())?;
    catalog.register(custom_xy_chart_standard())?;
    Ok(catalog)
}

#[must_use]
pub fn welcome() -> Story {
    Story::new("Welcome", "To Storybook", render_welcome)
}

#[must_use]
pub fn bar_stack_standard() -> Story {
    Story::new("bar-stack-example/dynamic", "Standard", render_bar_stack)
}

#[must_use]
pub fn custom_xy_chart_standard() -> Story {
    Story::new("custom-xy-chart/dynamic", "Standard", render_custom_xy_chart)
}

fn render_bar_stack(args: &StoryArgs) -> ChartResult<Option<RenderFrame>> {
    let mut chart = BarStackChart::new(args.props)?;
    if let Some(pointer) = args.pointer {
        chart.on_pointer(PointerInput::Move {
            x: pointer.x,
            y: pointer.y,
        })?;
    }
    chart.render_frame()
}

fn render_custom_xy_chart(args: &StoryArgs) -> ChartResult<Option<RenderFrame>> {
    let mut chart = TimeSeriesChart::new(args.props)?;
    if let Some(pointer) = args.pointer {
        chart.on_pointer(PointerInput::Move {
            x: pointer.x,
            y: pointer.y,
        })?;
    }
    chart.render_frame()
}

fn render_welcome(args: &StoryArgs) -> ChartResult<Option<RenderFrame>> {
    let props = args.props;
    if !props.is_renderable() {
        return Ok(None);
    }
    let theme = ChartTheme::default();
    let center = props.width / 2.0;
    let heading = Color::from_rgb8(0x33, 0x33, 0x33);

    let mut frame = RenderFrame::new(props.viewport()?);
    frame.push(Primitive::Rect(
        RectPrimitive::new(0.0, 0.0, props.width, props.height, Color::WHITE),
    ));
    frame.push(Primitive::Text(
        TextPrimitive::new("Welcome to storybook", center, 80.0, 32.0, heading, TextHAlign::Center)
            .bold(),
    ));
    for (row, line) in [
        "This catalog renders the chart widgets as standalone stories.",
        "Pick bar-stack-example or custom-xy-chart to see them.",
    ]
    .into_iter()
    .enumerate()
    {
        frame.push(Primitive::Text(TextPrimitive::new(
            line,
            center,
            130.0 + row as f64 * 24.0,
            16.0,
            theme.purple3,
            TextHAlign::Center,
        )));
    }
    Ok(Some(frame))
}
