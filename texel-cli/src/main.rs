use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use texel::{
    AlphaFader, AnimationCursor, Axis, BlendMode, Button, ButtonSize, ClipRegion, ColorKey,
    CpuDevice, CpuDeviceOpts, DeviceStats, Dot, Event, Flip, Font, FrameRGBA, Key, LoopStats,
    MouseButton, Point, PointerState, RenderContext, Rgba8, RotationControls, Scene,
    ScriptedInput, SpriteSheet, TexelResult, Texture,
};

#[derive(Parser, Debug)]
#[command(name = "texel", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Four sprite-sheet buttons in the window corners.
    Buttons(ButtonsArgs),
    /// Looping walk-cycle animation from a horizontal sprite strip.
    Walk(WalkArgs),
    /// One image drawn centered with rotation and mirroring.
    Arrow(ArrowArgs),
    /// A front image alpha-blended over a background.
    Fade(FadeArgs),
    /// A line of text rendered with a TTF font.
    Text(TextArgs),
    /// An arrow-key driven dot.
    Dot(DotArgs),
}

#[derive(Args, Debug)]
struct CommonArgs {
    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Window width in pixels.
    #[arg(long, default_value_t = 640)]
    width: u32,

    /// Window height in pixels.
    #[arg(long, default_value_t = 480)]
    height: u32,

    /// Frames to run before writing the last one.
    #[arg(long, default_value_t = 1)]
    frames: u64,

    /// Input event delivered before the first frame, e.g. `move:10,20`, `down:10,20`,
    /// `up:10,20`, `key:w`, `keyup:left`, `quit`. Repeatable; delivered in order.
    #[arg(long = "event", value_parser = parse_event)]
    events: Vec<Event>,

    /// RGB color keyed out of loaded images, as `RRGGBB`.
    #[arg(long, value_parser = parse_color_key)]
    color_key: Option<ColorKey>,

    /// Print a JSON summary to stdout.
    #[arg(long, default_value_t = false)]
    report: bool,
}

#[derive(Args, Debug)]
struct ButtonsArgs {
    #[command(flatten)]
    common: CommonArgs,

    /// Sprite sheet with the four button states stacked vertically.
    #[arg(long)]
    sheet: PathBuf,

    /// Button width in pixels.
    #[arg(long, default_value_t = 300)]
    button_width: u32,

    /// Button height in pixels.
    #[arg(long, default_value_t = 200)]
    button_height: u32,
}

#[derive(Args, Debug)]
struct WalkArgs {
    #[command(flatten)]
    common: CommonArgs,

    /// Sprite strip with the animation frames laid out left to right.
    #[arg(long)]
    sheet: PathBuf,

    /// Number of animation frames in the strip.
    #[arg(long, default_value_t = 4)]
    frame_count: u32,

    /// Width of one animation frame; defaults to the strip width divided by the count.
    #[arg(long)]
    frame_width: Option<u32>,

    /// Rendered frames each sprite is held for.
    #[arg(long, default_value_t = 4)]
    ticks_per_frame: u32,
}

#[derive(Args, Debug)]
struct ArrowArgs {
    #[command(flatten)]
    common: CommonArgs,

    /// Image to rotate.
    #[arg(long)]
    image: PathBuf,

    /// Initial clockwise rotation in degrees.
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    angle: f64,

    /// Initial mirror: none, horizontal or vertical.
    #[arg(long, default_value = "none", value_parser = parse_flip)]
    flip: Flip,
}

#[derive(Args, Debug)]
struct FadeArgs {
    #[command(flatten)]
    common: CommonArgs,

    /// Image blended on top.
    #[arg(long)]
    front: PathBuf,

    /// Background image.
    #[arg(long)]
    back: PathBuf,

    /// Initial alpha of the front image.
    #[arg(long, default_value_t = 255)]
    alpha: u8,
}

#[derive(Args, Debug)]
struct TextArgs {
    #[command(flatten)]
    common: CommonArgs,

    /// TTF/OTF font file.
    #[arg(long)]
    font: PathBuf,

    /// Font size in pixels.
    #[arg(long, default_value_t = 28.0)]
    size: f32,

    /// Text to render.
    #[arg(long)]
    text: String,
}

#[derive(Args, Debug)]
struct DotArgs {
    #[command(flatten)]
    common: CommonArgs,

    /// Dot image.
    #[arg(long)]
    image: PathBuf,
}

#[derive(serde::Serialize, Debug)]
struct Report<'a> {
    scene: &'a str,
    out: &'a Path,
    width: u32,
    height: u32,
    #[serde(flatten)]
    run: LoopStats,
    device: DeviceStats,
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();
    match cli.cmd {
        Command::Buttons(args) => cmd_buttons(args),
        Command::Walk(args) => cmd_walk(args),
        Command::Arrow(args) => cmd_arrow(args),
        Command::Fade(args) => cmd_fade(args),
        Command::Text(args) => cmd_text(args),
        Command::Dot(args) => cmd_dot(args),
    }
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("off"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

struct Session {
    ctx: RenderContext,
    input: ScriptedInput,
}

impl Session {
    fn new(common: &CommonArgs) -> anyhow::Result<Self> {
        let opts = CpuDeviceOpts::from_env().with_size(common.width, common.height);
        let device = Rc::new(RefCell::new(
            CpuDevice::new(opts).context("create cpu device")?,
        ));
        Ok(Self {
            ctx: RenderContext::new(device),
            input: ScriptedInput::from_events(common.events.iter().copied()),
        })
    }

    fn load(&self, path: &Path, key: Option<ColorKey>) -> anyhow::Result<Texture> {
        let mut tex = Texture::new(self.ctx.clone());
        tex.load_from_file(path, key)
            .with_context(|| format!("load image '{}'", path.display()))?;
        Ok(tex)
    }

    fn run(
        &mut self,
        name: &str,
        common: &CommonArgs,
        scene: &mut dyn Scene,
    ) -> anyhow::Result<()> {
        let (frame, stats) = texel::run_frames(
            &self.ctx,
            &mut self.input,
            Rgba8::WHITE,
            scene,
            common.frames,
        )
        .with_context(|| format!("run scene '{name}'"))?;
        write_png(&common.out, &frame)?;

        if common.report {
            let report = Report {
                scene: name,
                out: &common.out,
                width: frame.width,
                height: frame.height,
                run: stats,
                device: self.ctx.stats()?,
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        eprintln!("wrote {}", common.out.display());
        Ok(())
    }
}

fn write_png(out: &Path, frame: &FrameRGBA) -> anyhow::Result<()> {
    if let Some(parent) = out.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    image::save_buffer_with_format(
        out,
        &frame.data,
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", out.display()))
}

struct ButtonsScene {
    buttons: Vec<Button>,
}

impl Scene for ButtonsScene {
    fn handle_event(&mut self, event: &Event, pointer: PointerState) -> TexelResult<()> {
        for b in &mut self.buttons {
            b.handle_event(event, pointer.position());
        }
        Ok(())
    }

    fn render(&mut self, _ctx: &RenderContext) -> TexelResult<()> {
        self.buttons.iter().try_for_each(Button::render)
    }
}

fn cmd_buttons(args: ButtonsArgs) -> anyhow::Result<()> {
    let common = &args.common;
    let mut session = Session::new(common)?;
    let tex = session.load(&args.sheet, common.color_key)?;
    let clips = ClipRegion::strip(0, 0, args.button_width, args.button_height, 4, Axis::Vertical);
    let sheet = Rc::new(SpriteSheet::new(tex, clips).context("build button sheet")?);

    let size = ButtonSize::new(args.button_width, args.button_height);
    let right = signed(common.width) - signed(args.button_width);
    let bottom = signed(common.height) - signed(args.button_height);
    let buttons = [(0, 0), (right, 0), (0, bottom), (right, bottom)]
        .into_iter()
        .map(|(x, y)| Button::new(Point::new(x, y), size, sheet.clone()))
        .collect();

    session.run("buttons", common, &mut ButtonsScene { buttons })
}

struct WalkScene {
    sheet: SpriteSheet,
    cursor: AnimationCursor,
    window: (u32, u32),
}

impl Scene for WalkScene {
    fn handle_event(&mut self, _event: &Event, _pointer: PointerState) -> TexelResult<()> {
        Ok(())
    }

    fn render(&mut self, _ctx: &RenderContext) -> TexelResult<()> {
        let index = self.cursor.current_frame();
        let clip = self.sheet.clip(index)?;
        let x = (signed(self.window.0) - signed(clip.w)) / 2;
        let y = (signed(self.window.1) - signed(clip.h)) / 2;
        self.sheet.render(index, x, y)?;
        self.cursor.advance();
        Ok(())
    }
}

fn cmd_walk(args: WalkArgs) -> anyhow::Result<()> {
    let common = &args.common;
    let mut session = Session::new(common)?;
    let tex = session.load(&args.sheet, common.color_key)?;
    let cursor = AnimationCursor::new(args.ticks_per_frame, args.frame_count)?;

    let frame_width = args
        .frame_width
        .unwrap_or(tex.width() / args.frame_count);
    let clips = ClipRegion::strip(
        0,
        0,
        frame_width,
        tex.height(),
        args.frame_count,
        Axis::Horizontal,
    );
    let sheet = SpriteSheet::new(tex, clips).context("build walk sheet")?;

    let mut scene = WalkScene {
        sheet,
        cursor,
        window: (common.width, common.height),
    };
    session.run("walk", common, &mut scene)
}

struct ArrowScene {
    arrow: Texture,
    controls: RotationControls,
    window: (u32, u32),
}

impl Scene for ArrowScene {
    fn handle_event(&mut self, event: &Event, _pointer: PointerState) -> TexelResult<()> {
        self.controls.handle_event(event);
        Ok(())
    }

    fn render(&mut self, _ctx: &RenderContext) -> TexelResult<()> {
        self.controls.render_centered(&self.arrow, self.window)
    }
}

fn cmd_arrow(args: ArrowArgs) -> anyhow::Result<()> {
    let common = &args.common;
    let mut session = Session::new(common)?;
    let arrow = session.load(&args.image, common.color_key)?;
    let mut scene = ArrowScene {
        arrow,
        controls: RotationControls {
            degrees: args.angle,
            flip: args.flip,
        },
        window: (common.width, common.height),
    };
    session.run("arrow", common, &mut scene)
}

struct FadeScene {
    front: Texture,
    back: Texture,
    fader: AlphaFader,
}

impl Scene for FadeScene {
    fn handle_event(&mut self, event: &Event, _pointer: PointerState) -> TexelResult<()> {
        self.fader.handle_event(event);
        Ok(())
    }

    fn render(&mut self, _ctx: &RenderContext) -> TexelResult<()> {
        self.back.render(0, 0, None)?;
        self.fader.apply(&mut self.front)?;
        self.front.render(0, 0, None)
    }
}

fn cmd_fade(args: FadeArgs) -> anyhow::Result<()> {
    let common = &args.common;
    let mut session = Session::new(common)?;
    let back = session.load(&args.back, common.color_key)?;
    let mut front = session.load(&args.front, common.color_key)?;
    front.set_blend_mode(BlendMode::Blend)?;

    let mut scene = FadeScene {
        front,
        back,
        fader: AlphaFader::new(args.alpha),
    };
    session.run("fade", common, &mut scene)
}

struct TextScene {
    text: Texture,
    window: (u32, u32),
}

impl Scene for TextScene {
    fn handle_event(&mut self, _event: &Event, _pointer: PointerState) -> TexelResult<()> {
        Ok(())
    }

    fn render(&mut self, _ctx: &RenderContext) -> TexelResult<()> {
        let x = (signed(self.window.0) - signed(self.text.width())) / 2;
        let y = (signed(self.window.1) - signed(self.text.height())) / 2;
        self.text.render(x, y, None)
    }
}

fn cmd_text(args: TextArgs) -> anyhow::Result<()> {
    let common = &args.common;
    let mut session = Session::new(common)?;
    let font = Font::from_file(&args.font, args.size)
        .with_context(|| format!("load font '{}'", args.font.display()))?;
    let mut text = Texture::new(session.ctx.clone());
    text.load_from_rendered_text(&args.text, Rgba8::BLACK, &font)
        .with_context(|| format!("render text {:?}", args.text))?;

    let mut scene = TextScene {
        text,
        window: (common.width, common.height),
    };
    session.run("text", common, &mut scene)
}

struct DotScene {
    dot: Dot,
    image: Texture,
    window: (u32, u32),
}

impl Scene for DotScene {
    fn handle_event(&mut self, event: &Event, _pointer: PointerState) -> TexelResult<()> {
        self.dot.handle_event(event);
        Ok(())
    }

    fn render(&mut self, _ctx: &RenderContext) -> TexelResult<()> {
        self.dot.step(self.window);
        self.dot.render(&self.image)
    }
}

fn cmd_dot(args: DotArgs) -> anyhow::Result<()> {
    let common = &args.common;
    let mut session = Session::new(common)?;
    let image = session.load(&args.image, common.color_key)?;
    let mut scene = DotScene {
        dot: Dot::default(),
        image,
        window: (common.width, common.height),
    };
    session.run("dot", common, &mut scene)
}

fn signed(v: u32) -> i32 {
    i32::try_from(v).unwrap_or(i32::MAX)
}

fn parse_point(s: &str) -> Result<(i32, i32), String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected X,Y, got '{s}'"))?;
    let x = x.trim().parse().map_err(|e| format!("bad x in '{s}': {e}"))?;
    let y = y.trim().parse().map_err(|e| format!("bad y in '{s}': {e}"))?;
    Ok((x, y))
}

fn parse_key(s: &str) -> Result<Key, String> {
    Ok(match s.to_ascii_lowercase().as_str() {
        "up" => Key::Up,
        "down" => Key::Down,
        "left" => Key::Left,
        "right" => Key::Right,
        "w" => Key::W,
        "a" => Key::A,
        "s" => Key::S,
        "d" => Key::D,
        "q" => Key::Q,
        "e" => Key::E,
        "return" | "enter" => Key::Return,
        "escape" | "esc" => Key::Escape,
        other => return Err(format!("unknown key '{other}'")),
    })
}

fn parse_event(s: &str) -> Result<Event, String> {
    if s == "quit" {
        return Ok(Event::Quit);
    }
    let (kind, arg) = s
        .split_once(':')
        .ok_or_else(|| format!("expected KIND:ARG or 'quit', got '{s}'"))?;
    let button = MouseButton::Left;
    match kind {
        "move" => parse_point(arg).map(|(x, y)| Event::PointerMove { x, y }),
        "down" => parse_point(arg).map(|(x, y)| Event::PointerDown { x, y, button }),
        "up" => parse_point(arg).map(|(x, y)| Event::PointerUp { x, y, button }),
        "key" => parse_key(arg).map(|key| Event::KeyDown { key, repeat: false }),
        "keyup" => parse_key(arg).map(|key| Event::KeyUp { key, repeat: false }),
        other => Err(format!("unknown event kind '{other}'")),
    }
}

fn parse_color_key(s: &str) -> Result<ColorKey, String> {
    let hex = s.trim_start_matches('#');
    if hex.len() != 6 {
        return Err(format!("expected RRGGBB, got '{s}'"));
    }
    let channel = |i: usize| {
        hex.get(i..i + 2)
            .and_then(|c| u8::from_str_radix(c, 16).ok())
            .ok_or_else(|| format!("bad hex in '{s}'"))
    };
    Ok(ColorKey::rgb(channel(0)?, channel(2)?, channel(4)?))
}

fn parse_flip(s: &str) -> Result<Flip, String> {
    match s.to_ascii_lowercase().as_str() {
        "none" => Ok(Flip::None),
        "horizontal" | "h" => Ok(Flip::Horizontal),
        "vertical" | "v" => Ok(Flip::Vertical),
        other => Err(format!("unknown flip '{other}'")),
    }
}
