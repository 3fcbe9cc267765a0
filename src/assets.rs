use crate::constants::{
    texture_extent, MAX_TEXTURE_DIM, SIGN_BACKGROUND, SIGN_FONT, SIGN_LINE_OFFSET_PX,
    SIGN_TEXT_COLOR,
};
use anyhow::{anyhow, Context};
use gallery_core::catalog::PlacedPainting;
use gallery_core::scene::{WELCOME_CANVAS_PX, WELCOME_LINES};
use gallery_core::CompletionQueue;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys as web;

/// Tightly packed RGBA8 pixels ready for a texture upload.
pub struct DecodedImage {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

pub type PaintingQueue = CompletionQueue<(usize, DecodedImage)>;

/// Start one load task per painting. Each decoded image lands in `queue`;
/// failures are logged and the painting never appears.
pub fn request_paintings(paintings: &[PlacedPainting], queue: &PaintingQueue) {
    for painting in paintings {
        let index = painting.index;
        let id = painting.record.id;
        let src = painting.record.image_src;
        let queue = queue.clone();
        spawn_local(async move {
            match load_and_rasterize(src).await {
                Ok(image) => {
                    log::info!(
                        "[catalog] loaded {} ({}x{})",
                        id,
                        image.width,
                        image.height
                    );
                    queue.push((index, image));
                }
                Err(e) => log::error!("[catalog] failed to load {} from {}: {:?}", id, src, e),
            }
        });
    }
}

async fn load_and_rasterize(src: &str) -> anyhow::Result<DecodedImage> {
    let img = load_image(src).await?;
    rasterize(&img)
}

pub async fn load_image(src: &str) -> anyhow::Result<web::HtmlImageElement> {
    let img = web::HtmlImageElement::new().map_err(|e| anyhow!("{:?}", e))?;
    let mut settle = |resolve: js_sys::Function, reject: js_sys::Function| {
        img.set_onload(Some(&resolve));
        img.set_onerror(Some(&reject));
    };
    let promise = js_sys::Promise::new(&mut settle);
    img.set_src(src);
    JsFuture::from(promise)
        .await
        .map_err(|e| anyhow!("image load error: {:?}", e))?;
    img.set_onload(None);
    img.set_onerror(None);
    Ok(img)
}

/// Draw the image into a scratch 2D canvas, downscaling oversized images.
pub fn rasterize(img: &web::HtmlImageElement) -> anyhow::Result<DecodedImage> {
    let (nw, nh) = (img.natural_width(), img.natural_height());
    if nw == 0 || nh == 0 {
        return Err(anyhow!("image has no pixels"));
    }
    let (width, height) = texture_extent(nw, nh, MAX_TEXTURE_DIM);
    let (_, ctx) = scratch_canvas(width, height)?;
    ctx.draw_image_with_html_image_element_and_dw_and_dh(
        img,
        0.0,
        0.0,
        width as f64,
        height as f64,
    )
    .map_err(|e| anyhow!("drawImage: {:?}", e))?;
    read_pixels(&ctx, width, height)
}

/// The entrance sign: two centred lines of light text on a dark board.
pub fn render_welcome_sign() -> anyhow::Result<DecodedImage> {
    let (width, height) = WELCOME_CANVAS_PX;
    let (_, ctx) = scratch_canvas(width, height)?;
    ctx.set_fill_style_str(SIGN_BACKGROUND);
    ctx.fill_rect(0.0, 0.0, width as f64, height as f64);
    ctx.set_font(SIGN_FONT);
    ctx.set_text_align("center");
    ctx.set_text_baseline("middle");
    ctx.set_fill_style_str(SIGN_TEXT_COLOR);
    let mid = height as f64 / 2.0;
    let [top, bottom] = WELCOME_LINES;
    ctx.fill_text(top, width as f64 / 2.0, mid - SIGN_LINE_OFFSET_PX)
        .map_err(|e| anyhow!("fillText: {:?}", e))?;
    ctx.fill_text(bottom, width as f64 / 2.0, mid + SIGN_LINE_OFFSET_PX)
        .map_err(|e| anyhow!("fillText: {:?}", e))?;
    read_pixels(&ctx, width, height)
}

fn scratch_canvas(
    width: u32,
    height: u32,
) -> anyhow::Result<(web::HtmlCanvasElement, web::CanvasRenderingContext2d)> {
    let document = crate::dom::window_document().context("no document")?;
    let canvas: web::HtmlCanvasElement = document
        .create_element("canvas")
        .map_err(|e| anyhow!("{:?}", e))?
        .dyn_into()
        .map_err(|_| anyhow!("created element is not a canvas"))?;
    canvas.set_width(width);
    canvas.set_height(height);
    let ctx: web::CanvasRenderingContext2d = canvas
        .get_context("2d")
        .map_err(|e| anyhow!("{:?}", e))?
        .context("2d context unavailable")?
        .dyn_into()
        .map_err(|_| anyhow!("unexpected 2d context type"))?;
    Ok((canvas, ctx))
}

fn read_pixels(
    ctx: &web::CanvasRenderingContext2d,
    width: u32,
    height: u32,
) -> anyhow::Result<DecodedImage> {
    let data = ctx
        .get_image_data(0.0, 0.0, width as f64, height as f64)
        .map_err(|e| anyhow!("getImageData: {:?}", e))?;
    Ok(DecodedImage {
        width,
        height,
        rgba: data.data().0,
    })
}
