//! Linux fbdev frame buffer surface.
//!
//! The device node is opened read/write, its geometry and channel layout are
//! queried with `FBIOGET_VSCREENINFO`/`FBIOGET_FSCREENINFO`, and the whole
//! virtual buffer is mapped shared. Pixels are accessed with volatile reads and
//! writes since the display driver and other processes share the mapping.

use std::ffi::c_void;
use std::fmt;
use std::fs::{File, OpenOptions};
use std::num::NonZeroUsize;
use std::os::fd::AsRawFd;
use std::path::{Path, PathBuf};
use std::ptr::NonNull;

use anyhow::Context as _;
use nix::libc::c_ulong;
use nix::sys::mman::{MapFlags, ProtFlags, mmap, munmap};

use crate::foundation::error::{FbPaintError, FbPaintResult};
use crate::pixel::rgb::Rgb;
use crate::surface::Surface;
use crate::surface::layout::{ChannelLayout, PixelLayout};

const FBIOGET_VSCREENINFO: u32 = 0x4600;
const FBIOGET_FSCREENINFO: u32 = 0x4602;

/// `struct fb_bitfield` from `<linux/fb.h>`.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default)]
#[allow(dead_code)]
struct FbBitfield {
    offset: u32,
    length: u32,
    msb_right: u32,
}

/// `struct fb_var_screeninfo` from `<linux/fb.h>`.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default)]
#[allow(dead_code)]
struct FbVarScreenInfo {
    xres: u32,
    yres: u32,
    xres_virtual: u32,
    yres_virtual: u32,
    xoffset: u32,
    yoffset: u32,
    bits_per_pixel: u32,
    grayscale: u32,
    red: FbBitfield,
    green: FbBitfield,
    blue: FbBitfield,
    transp: FbBitfield,
    nonstd: u32,
    activate: u32,
    height: u32,
    width: u32,
    accel_flags: u32,
    pixclock: u32,
    left_margin: u32,
    right_margin: u32,
    upper_margin: u32,
    lower_margin: u32,
    hsync_len: u32,
    vsync_len: u32,
    sync: u32,
    vmode: u32,
    rotate: u32,
    colorspace: u32,
    reserved: [u32; 4],
}

/// `struct fb_fix_screeninfo` from `<linux/fb.h>`.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default)]
#[allow(dead_code)]
struct FbFixScreenInfo {
    id: [u8; 16],
    smem_start: c_ulong,
    smem_len: u32,
    kind: u32,
    type_aux: u32,
    visual: u32,
    xpanstep: u16,
    ypanstep: u16,
    ywrapstep: u16,
    line_length: u32,
    mmio_start: c_ulong,
    mmio_len: u32,
    accel: u32,
    capabilities: u16,
    reserved: [u16; 2],
}

nix::ioctl_read_bad!(fbioget_vscreeninfo, FBIOGET_VSCREENINFO, FbVarScreenInfo);
nix::ioctl_read_bad!(fbioget_fscreeninfo, FBIOGET_FSCREENINFO, FbFixScreenInfo);

/// The shared mapping plus the descriptor it came from.
///
/// Unmaps on drop; the file closes right after.
struct Mapping {
    ptr: NonNull<c_void>,
    len: usize,
    _file: File,
}

impl Drop for Mapping {
    fn drop(&mut self) {
        // SAFETY: `ptr`/`len` describe a live mapping created by `mmap` and
        // owned exclusively by this value.
        if let Err(err) = unsafe { munmap(self.ptr, self.len) } {
            tracing::warn!(error = %err, "munmap of frame buffer failed");
        }
    }
}

/// A memory-mapped fbdev device such as `/dev/fb0`.
///
/// Opening never fails outright: any error leaves the frame buffer closed, and
/// a closed frame buffer reads black and ignores writes.
pub struct FrameBuffer {
    path: PathBuf,
    mapping: Option<Mapping>,
    layout: PixelLayout,
}

impl FrameBuffer {
    /// Open and map the device at `path`, logging and returning a closed frame
    /// buffer on failure.
    pub fn open(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::try_open(path) {
            Ok(fb) => fb,
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "frame buffer unavailable");
                Self {
                    path: path.to_path_buf(),
                    mapping: None,
                    layout: PixelLayout::default(),
                }
            }
        }
    }

    /// Open and map the device at `path`, returning the failure reason.
    pub fn try_open(path: impl AsRef<Path>) -> FbPaintResult<Self> {
        let path = path.as_ref();
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .open(path)
            .with_context(|| format!("open frame buffer '{}'", path.display()))?;

        let (var, fix) = query_screen_info(&file)
            .with_context(|| format!("query screen info of '{}'", path.display()))?;
        let layout = layout_from_screen_info(&var, &fix)?;

        let len = (var.yres_virtual as usize)
            .checked_mul(fix.line_length as usize)
            .and_then(NonZeroUsize::new)
            .ok_or_else(|| {
                FbPaintError::device(format!("'{}' reports an empty buffer", path.display()))
            })?;

        Self::map(path, file, layout, len)
    }

    /// Map `len` bytes of `file` shared read/write and wrap them with `layout`.
    fn map(path: &Path, file: File, layout: PixelLayout, len: NonZeroUsize) -> FbPaintResult<Self> {
        // SAFETY: maps a fresh region chosen by the kernel; the fd stays open
        // for the lifetime of the mapping.
        let ptr = unsafe {
            mmap(
                None,
                len,
                ProtFlags::PROT_READ | ProtFlags::PROT_WRITE,
                MapFlags::MAP_SHARED,
                &file,
                0,
            )
        }
        .with_context(|| format!("map frame buffer '{}'", path.display()))?;

        tracing::debug!(
            path = %path.display(),
            width = layout.width,
            height = layout.height,
            bytes_per_pixel = layout.bytes_per_pixel,
            line_length = layout.line_length,
            mapped_len = len.get(),
            "frame buffer opened"
        );

        Ok(Self {
            path: path.to_path_buf(),
            mapping: Some(Mapping {
                ptr,
                len: len.get(),
                _file: file,
            }),
            layout,
        })
    }

    /// Device path this frame buffer was opened from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Queried geometry and channel layout (all zero when closed).
    pub fn layout(&self) -> PixelLayout {
        self.layout
    }

    /// Unmap and close the device. Safe to call repeatedly.
    pub fn close(&mut self) {
        if self.mapping.take().is_some() {
            tracing::debug!(path = %self.path.display(), "frame buffer closed");
        }
        self.layout = PixelLayout::default();
    }

    fn pixel_ptr(&self, x: usize, y: usize) -> Option<*mut u8> {
        let mapping = self.mapping.as_ref()?;
        let offset = self.layout.byte_offset(x, y, mapping.len)?;
        // SAFETY: `byte_offset` guarantees `offset + bytes_per_pixel <= len`.
        Some(unsafe { mapping.ptr.as_ptr().cast::<u8>().add(offset) })
    }
}

impl Surface for FrameBuffer {
    fn is_open(&self) -> bool {
        self.mapping.is_some()
    }

    fn width(&self) -> usize {
        self.layout.width
    }

    fn height(&self) -> usize {
        self.layout.height
    }

    fn pixel(&self, x: usize, y: usize) -> Rgb {
        let Some(ptr) = self.pixel_ptr(x, y) else {
            return Rgb::BLACK;
        };
        let bpp = self.layout.bytes_per_pixel;
        if bpp == 4 && ptr.align_offset(4) == 0 {
            // SAFETY: in-bounds and 4-byte aligned.
            let packed = unsafe { ptr.cast::<u32>().read_volatile() };
            return self.layout.unpack(packed);
        }
        let mut bytes = [0u8; 4];
        for (i, b) in bytes.iter_mut().take(bpp).enumerate() {
            // SAFETY: `i < bytes_per_pixel`, within the checked range.
            *b = unsafe { ptr.add(i).read_volatile() };
        }
        self.layout.read_bytes(&bytes[..bpp])
    }

    fn set_pixel(&mut self, x: usize, y: usize, color: Rgb) {
        if color.is_null() {
            return;
        }
        let Some(ptr) = self.pixel_ptr(x, y) else {
            return;
        };
        let bpp = self.layout.bytes_per_pixel;
        if bpp == 4 && ptr.align_offset(4) == 0 {
            // SAFETY: in-bounds and 4-byte aligned.
            unsafe { ptr.cast::<u32>().write_volatile(self.layout.pack(color)) };
            return;
        }
        let mut bytes = [0u8; 4];
        self.layout.write_bytes(color, &mut bytes[..bpp]);
        for (i, b) in bytes.iter().take(bpp).enumerate() {
            // SAFETY: `i < bytes_per_pixel`, within the checked range.
            unsafe { ptr.add(i).write_volatile(*b) };
        }
    }
}

impl fmt::Debug for FrameBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FrameBuffer")
            .field("path", &self.path)
            .field("open", &self.is_open())
            .field("layout", &self.layout)
            .finish()
    }
}

fn query_screen_info(file: &File) -> nix::Result<(FbVarScreenInfo, FbFixScreenInfo)> {
    let fd = file.as_raw_fd();
    let mut var = FbVarScreenInfo::default();
    let mut fix = FbFixScreenInfo::default();
    // SAFETY: `fd` is open for the duration of the calls and both structs
    // match the kernel's layout.
    unsafe {
        fbioget_vscreeninfo(fd, &mut var)?;
        fbioget_fscreeninfo(fd, &mut fix)?;
    }
    Ok((var, fix))
}

fn layout_from_screen_info(
    var: &FbVarScreenInfo,
    fix: &FbFixScreenInfo,
) -> FbPaintResult<PixelLayout> {
    if var.grayscale != 0 {
        return Err(FbPaintError::device(
            "grayscale and FOURCC modes are not supported",
        ));
    }
    if var.bits_per_pixel % 8 != 0 {
        return Err(FbPaintError::device(format!(
            "unsupported pixel depth: {} bits",
            var.bits_per_pixel
        )));
    }
    let layout = PixelLayout {
        width: var.xres as usize,
        height: var.yres as usize,
        bytes_per_pixel: (var.bits_per_pixel / 8) as usize,
        line_length: fix.line_length as usize,
        x_offset: var.xoffset as usize,
        y_offset: var.yoffset as usize,
        red: ChannelLayout::new(var.red.offset, var.red.length),
        green: ChannelLayout::new(var.green.offset, var.green.length),
        blue: ChannelLayout::new(var.blue.offset, var.blue.length),
    };
    if !layout.is_supported() {
        return Err(FbPaintError::device(format!(
            "unsupported pixel depth: {} bits",
            var.bits_per_pixel
        )));
    }
    Ok(layout)
}

#[cfg(test)]
#[path = "../../tests/unit/surface/framebuffer.rs"]
mod tests;
