use super::helpers::{self, DEPTH_FORMAT};

/// Size-dependent attachments for the main pass.
///
/// - `depth_view` matches the colour sample count.
/// - `msaa_view` exists only when multisampling; the surface texture is then
///   the resolve target.
pub(crate) struct RenderTargets {
    pub(crate) depth_view: wgpu::TextureView,
    pub(crate) msaa_view: Option<wgpu::TextureView>,
    color_format: wgpu::TextureFormat,
    sample_count: u32,
}

impl RenderTargets {
    pub(crate) fn new(
        device: &wgpu::Device,
        width: u32,
        height: u32,
        color_format: wgpu::TextureFormat,
        sample_count: u32,
    ) -> Self {
        let (depth_view, msaa_view) =
            Self::create(device, width, height, color_format, sample_count);
        Self {
            depth_view,
            msaa_view,
            color_format,
            sample_count,
        }
    }

    pub(crate) fn recreate(&mut self, device: &wgpu::Device, width: u32, height: u32) {
        (self.depth_view, self.msaa_view) =
            Self::create(device, width, height, self.color_format, self.sample_count);
    }

    fn create(
        device: &wgpu::Device,
        width: u32,
        height: u32,
        color_format: wgpu::TextureFormat,
        sample_count: u32,
    ) -> (wgpu::TextureView, Option<wgpu::TextureView>) {
        let (_, depth_view) = helpers::create_attachment(
            device,
            "depth",
            width,
            height,
            DEPTH_FORMAT,
            sample_count,
            wgpu::TextureUsages::RENDER_ATTACHMENT,
        );
        let msaa_view = (sample_count > 1).then(|| {
            helpers::create_attachment(
                device,
                "msaa_color",
                width,
                height,
                color_format,
                sample_count,
                wgpu::TextureUsages::RENDER_ATTACHMENT,
            )
            .1
        });
        (depth_view, msaa_view)
    }
}
