use std::cell::{Cell, RefCell};

use crate::awareness::ProcessDpiAwareness;
use crate::dpi::{Dpi, Vector};
use crate::error::NativeError;
use crate::os_version::OsVersion;
use crate::platform::{DpiPlatform, WindowHandle};
use crate::surface::{Geometry, SizeConstraints, WindowSurface};

/// 可编排应答的原生接口
pub struct FakePlatform {
    os: OsVersion,
    awareness: Cell<ProcessDpiAwareness>,
    awareness_query_fails: bool,
    accepts_change: bool,
    legacy_aware: Cell<bool>,
    requested: RefCell<Vec<ProcessDpiAwareness>>,
    legacy_set_calls: Cell<usize>,
    monitor_dpi: Cell<Option<Dpi>>,
    monitor_queries: Cell<usize>,
}

impl FakePlatform {
    pub fn new(os: OsVersion) -> Self {
        Self {
            os,
            awareness: Cell::new(ProcessDpiAwareness::Unaware),
            awareness_query_fails: false,
            accepts_change: true,
            legacy_aware: Cell::new(false),
            requested: RefCell::new(Vec::new()),
            legacy_set_calls: Cell::new(0),
            monitor_dpi: Cell::new(Some(Dpi::BASELINE)),
            monitor_queries: Cell::new(0),
        }
    }

    pub fn with_awareness(self, awareness: ProcessDpiAwareness) -> Self {
        self.awareness.set(awareness);
        self
    }

    pub fn with_monitor_dpi(self, dpi: Dpi) -> Self {
        self.monitor_dpi.set(Some(dpi));
        self
    }

    pub fn reject_awareness_change(mut self) -> Self {
        self.accepts_change = false;
        self
    }

    pub fn fail_awareness_query(mut self) -> Self {
        self.awareness_query_fails = true;
        self
    }

    pub fn legacy_aware(self, aware: bool) -> Self {
        self.legacy_aware.set(aware);
        self
    }

    pub fn set_monitor_dpi(&self, dpi: Dpi) {
        self.monitor_dpi.set(Some(dpi));
    }

    pub fn fail_monitor_query(&self) {
        self.monitor_dpi.set(None);
    }

    pub fn requested_awareness(&self) -> Vec<ProcessDpiAwareness> {
        self.requested.borrow().clone()
    }

    pub fn legacy_set_calls(&self) -> usize {
        self.legacy_set_calls.get()
    }

    pub fn monitor_queries(&self) -> usize {
        self.monitor_queries.get()
    }
}

impl DpiPlatform for FakePlatform {
    fn is_os_at_least(&self, version: OsVersion) -> bool {
        self.os >= version
    }

    fn process_dpi_awareness(&self) -> Result<ProcessDpiAwareness, NativeError> {
        if self.awareness_query_fails {
            return Err(NativeError::Call {
                api: "GetProcessDpiAwareness",
                code: -1,
            });
        }
        Ok(self.awareness.get())
    }

    fn is_process_dpi_aware(&self) -> bool {
        self.legacy_aware.get()
    }

    fn set_process_dpi_awareness(
        &self,
        awareness: ProcessDpiAwareness,
    ) -> Result<(), NativeError> {
        self.requested.borrow_mut().push(awareness);
        if !self.accepts_change {
            return Err(NativeError::Call {
                api: "SetProcessDpiAwareness",
                code: -1,
            });
        }
        self.awareness.set(awareness);
        Ok(())
    }

    fn set_process_dpi_aware(&self) -> Result<(), NativeError> {
        self.legacy_set_calls.set(self.legacy_set_calls.get() + 1);
        self.legacy_aware.set(true);
        Ok(())
    }

    fn monitor_dpi(&self, _window: WindowHandle) -> Result<Dpi, NativeError> {
        self.monitor_queries.set(self.monitor_queries.get() + 1);
        self.monitor_dpi.get().ok_or(NativeError::Call {
            api: "GetDpiForMonitor",
            code: -1,
        })
    }
}

/// 内存中的窗口
pub struct FakeSurface {
    geometry: Geometry,
    constraints: SizeConstraints,
    transform: Vector,
    layout_scale: Option<Vector>,
    layout_calls: usize,
    minimized: bool,
    handle: Option<WindowHandle>,
}

impl FakeSurface {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            geometry: Geometry {
                left: 0.0,
                top: 0.0,
                width,
                height,
            },
            constraints: SizeConstraints::default(),
            transform: Vector::IDENTITY,
            layout_scale: None,
            layout_calls: 0,
            minimized: false,
            handle: Some(WindowHandle(1)),
        }
    }

    pub fn with_transform(mut self, transform: Vector) -> Self {
        self.transform = transform;
        self
    }

    pub fn with_constraints(mut self, constraints: SizeConstraints) -> Self {
        self.constraints = constraints;
        self
    }

    pub fn without_handle(mut self) -> Self {
        self.handle = None;
        self
    }

    pub fn set_minimized(&mut self, minimized: bool) {
        self.minimized = minimized;
    }

    pub fn layout_scale(&self) -> Option<Vector> {
        self.layout_scale
    }

    pub fn layout_calls(&self) -> usize {
        self.layout_calls
    }
}

impl WindowSurface for FakeSurface {
    fn geometry(&self) -> Geometry {
        self.geometry
    }

    fn set_position(&mut self, left: f64, top: f64) {
        self.geometry.left = left;
        self.geometry.top = top;
    }

    fn set_size(&mut self, width: f64, height: f64) {
        self.geometry.width = width;
        self.geometry.height = height;
    }

    fn constraints(&self) -> SizeConstraints {
        self.constraints
    }

    fn set_constraints(&mut self, constraints: SizeConstraints) {
        self.constraints = constraints;
    }

    fn transform_to_device(&self) -> Vector {
        self.transform
    }

    fn set_layout_scale(&mut self, scale: Option<Vector>) {
        self.layout_scale = scale;
        self.layout_calls += 1;
    }

    fn is_minimized(&self) -> bool {
        self.minimized
    }

    fn native_handle(&self) -> Option<WindowHandle> {
        self.handle
    }
}
