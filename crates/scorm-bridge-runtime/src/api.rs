//! The two API surfaces a content package calls.
//!
//! SCORM mandates string results: boolean operations answer `"true"` or
//! `"false"`, never a native boolean, and errors are reported through
//! `GetLastError` rather than exceptions. Both surfaces here are thin
//! adapters over one shared [`RuntimeBridge`], so a mutation made through
//! the 1.2 surface is observable through the 2004 surface and vice versa.

use std::sync::{Arc, Mutex};

use crate::bridge::RuntimeBridge;

/// The standard's truthy result string.
pub const SCORM_TRUE: &str = "true";
/// The standard's falsy result string.
pub const SCORM_FALSE: &str = "false";

fn scorm_bool(value: bool) -> &'static str {
    if value {
        SCORM_TRUE
    } else {
        SCORM_FALSE
    }
}

/// The SCORM 1.2 runtime surface (`API` global).
///
/// The standard passes an empty-string parameter to `LMSInitialize`,
/// `LMSFinish` and `LMSCommit`; it is accepted and ignored here.
#[derive(Clone)]
pub struct Scorm12Api {
    bridge: Arc<Mutex<RuntimeBridge>>,
}

impl Scorm12Api {
    /// Wrap a shared bridge.
    pub fn new(bridge: Arc<Mutex<RuntimeBridge>>) -> Self {
        Self { bridge }
    }

    /// `LMSInitialize("")`
    pub fn lms_initialize(&self, _param: &str) -> &'static str {
        scorm_bool(self.bridge.lock().unwrap().initialize())
    }

    /// `LMSFinish("")`
    pub fn lms_finish(&self, _param: &str) -> &'static str {
        scorm_bool(self.bridge.lock().unwrap().terminate())
    }

    /// `LMSGetValue(element)`
    pub fn lms_get_value(&self, element: &str) -> String {
        self.bridge.lock().unwrap().get_value(element)
    }

    /// `LMSSetValue(element, value)`
    pub fn lms_set_value(&self, element: &str, value: &str) -> &'static str {
        scorm_bool(self.bridge.lock().unwrap().set_value(element, value))
    }

    /// `LMSCommit("")`
    pub fn lms_commit(&self, _param: &str) -> &'static str {
        scorm_bool(self.bridge.lock().unwrap().commit())
    }

    /// `LMSGetLastError()`
    pub fn lms_get_last_error(&self) -> &'static str {
        self.bridge.lock().unwrap().last_error().code()
    }

    /// `LMSGetErrorString(code)`
    pub fn lms_get_error_string(&self, code: &str) -> &'static str {
        self.bridge.lock().unwrap().error_string(code)
    }

    /// `LMSGetDiagnostic(code)`
    pub fn lms_get_diagnostic(&self, code: &str) -> String {
        self.bridge.lock().unwrap().diagnostic(code)
    }
}

/// The SCORM 2004 runtime surface (`API_1484_11` global).
///
/// Direct 1:1 aliases of the 1.2 operations; `Terminate` carries the
/// `LMSFinish` semantics.
#[derive(Clone)]
pub struct Scorm2004Api {
    bridge: Arc<Mutex<RuntimeBridge>>,
}

impl Scorm2004Api {
    /// Wrap a shared bridge.
    pub fn new(bridge: Arc<Mutex<RuntimeBridge>>) -> Self {
        Self { bridge }
    }

    /// `Initialize("")`
    pub fn initialize(&self, _param: &str) -> &'static str {
        scorm_bool(self.bridge.lock().unwrap().initialize())
    }

    /// `Terminate("")`
    pub fn terminate(&self, _param: &str) -> &'static str {
        scorm_bool(self.bridge.lock().unwrap().terminate())
    }

    /// `GetValue(element)`
    pub fn get_value(&self, element: &str) -> String {
        self.bridge.lock().unwrap().get_value(element)
    }

    /// `SetValue(element, value)`
    pub fn set_value(&self, element: &str, value: &str) -> &'static str {
        scorm_bool(self.bridge.lock().unwrap().set_value(element, value))
    }

    /// `Commit("")`
    pub fn commit(&self, _param: &str) -> &'static str {
        scorm_bool(self.bridge.lock().unwrap().commit())
    }

    /// `GetLastError()`
    pub fn get_last_error(&self) -> &'static str {
        self.bridge.lock().unwrap().last_error().code()
    }

    /// `GetErrorString(code)`
    pub fn get_error_string(&self, code: &str) -> &'static str {
        self.bridge.lock().unwrap().error_string(code)
    }

    /// `GetDiagnostic(code)`
    pub fn get_diagnostic(&self, code: &str) -> String {
        self.bridge.lock().unwrap().diagnostic(code)
    }
}
