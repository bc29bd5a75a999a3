//! Applies the reuse options to a raw socket, between creation and bind/connect.
//!
//! The option identifiers and the way a raw descriptor is reached are not portable, so one
//! implementation is selected per target OS at compile time. `SO_REUSEADDR` is always set;
//! `SO_REUSEPORT` is set only on the targets which honour it, and is compiled out
//! elsewhere.

/// Whether sockets created by this crate get true same-port reuse (`SO_REUSEPORT` or
/// equivalent) on this target, as opposed to address reuse only.
///
/// Where this is `false`, a second reusable listen on an already-bound port fails with the
/// usual address-in-use error.
pub const ENABLED: bool = self::platform::ENABLED;

pub use self::platform::enable_reuse;

#[cfg(unix)]
mod platform {
    use libc;
    use std::io;
    use std::mem;
    use std::os::unix::io::{AsRawFd, RawFd};

    #[cfg(any(
        target_os = "linux",
        target_os = "android",
        target_os = "macos",
        target_os = "ios",
        target_os = "freebsd",
        target_os = "netbsd",
        target_os = "openbsd",
        target_os = "dragonfly"
    ))]
    pub const ENABLED: bool = true;
    #[cfg(not(any(
        target_os = "linux",
        target_os = "android",
        target_os = "macos",
        target_os = "ios",
        target_os = "freebsd",
        target_os = "netbsd",
        target_os = "openbsd",
        target_os = "dragonfly"
    )))]
    pub const ENABLED: bool = false;

    #[allow(unsafe_code)]
    fn set_opt(fd: RawFd, opt: libc::c_int) -> io::Result<()> {
        let one: libc::c_int = 1;
        let one_ptr: *const libc::c_int = &one;
        let ret = unsafe {
            libc::setsockopt(
                fd,
                libc::SOL_SOCKET,
                opt,
                one_ptr as *const libc::c_void,
                mem::size_of::<libc::c_int>() as libc::socklen_t,
            )
        };
        if ret != 0 {
            return Err(io::Error::last_os_error());
        }
        Ok(())
    }

    /// Sets the reuse options on the socket's raw descriptor. The descriptor is borrowed
    /// for the duration of the call only.
    pub fn enable_reuse<S: AsRawFd>(sock: &S) -> io::Result<()> {
        let fd = sock.as_raw_fd();
        set_opt(fd, libc::SO_REUSEADDR)?;
        #[cfg(any(
            target_os = "linux",
            target_os = "android",
            target_os = "macos",
            target_os = "ios",
            target_os = "freebsd",
            target_os = "netbsd",
            target_os = "openbsd",
            target_os = "dragonfly"
        ))]
        set_opt(fd, libc::SO_REUSEPORT)?;
        Ok(())
    }
}

#[cfg(windows)]
mod platform {
    use std::io;
    use std::mem;
    use std::os::windows::io::AsRawSocket;
    use windows_sys::Win32::Networking::WinSock;

    pub const ENABLED: bool = false;

    /// Sets `SO_REUSEADDR` on the socket's handle. Windows has no `SO_REUSEPORT`; address
    /// reuse is the strongest the platform offers.
    #[allow(unsafe_code)]
    pub fn enable_reuse<S: AsRawSocket>(sock: &S) -> io::Result<()> {
        let one: i32 = 1;
        let one_ptr: *const i32 = &one;
        let ret = unsafe {
            WinSock::setsockopt(
                sock.as_raw_socket() as WinSock::SOCKET,
                WinSock::SOL_SOCKET as i32,
                WinSock::SO_REUSEADDR as i32,
                one_ptr as *const u8,
                mem::size_of::<i32>() as i32,
            )
        };
        if ret == WinSock::SOCKET_ERROR {
            return Err(io::Error::last_os_error());
        }
        Ok(())
    }
}
