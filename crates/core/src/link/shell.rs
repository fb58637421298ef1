//! Windows `.lnk` shell links through IShellLinkW

use super::{LinkSpec, LinkWriter};
use ::windows::core::{Interface, HSTRING};
use ::windows::Win32::Foundation::TRUE;
use ::windows::Win32::System::Com::{
    CoCreateInstance, CoInitializeEx, IPersistFile, CLSCTX_INPROC_SERVER, COINIT_APARTMENTTHREADED,
};
use ::windows::Win32::UI::Shell::{IShellLinkW, ShellLink};
use std::io;
use std::path::Path;

pub struct ShellLinkWriter;

impl ShellLinkWriter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ShellLinkWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl LinkWriter for ShellLinkWriter {
    fn extension(&self) -> &str {
        "lnk"
    }

    fn write_link(&self, spec: &LinkSpec<'_>, path: &Path) -> io::Result<()> {
        // SAFETY: COM is initialized on this thread before any interface call,
        // and every string handed to the shell outlives the call that reads it.
        unsafe { save_shell_link(spec, path) }
            .map_err(|e| io::Error::new(io::ErrorKind::Other, e.to_string()))
    }
}

unsafe fn save_shell_link(spec: &LinkSpec<'_>, path: &Path) -> ::windows::core::Result<()> {
    // S_FALSE (already initialized) is fine, so is a thread already in the MTA
    let _ = CoInitializeEx(None, COINIT_APARTMENTTHREADED);

    let link: IShellLinkW = CoCreateInstance(&ShellLink, None, CLSCTX_INPROC_SERVER)?;
    link.SetPath(&HSTRING::from(spec.target))?;
    link.SetWorkingDirectory(&HSTRING::from(spec.working_dir))?;
    link.SetIconLocation(&HSTRING::from(spec.icon), spec.icon_index)?;
    link.SetDescription(&HSTRING::from(spec.name))?;

    let persist: IPersistFile = link.cast()?;
    persist.Save(&HSTRING::from(path), TRUE)
}
