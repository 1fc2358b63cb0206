//! Init script for the main surface that reports client-side route changes.
//!
//! Single-page navigation never fires a page-load event, so the script hooks
//! the history API and forwards each new location to
//! [`SURFACE_IN_PAGE_NAVIGATED_COMMAND`](crate::SURFACE_IN_PAGE_NAVIGATED_COMMAND).

pub(crate) const NAVIGATION_HOOK_SCRIPT: &str = r#"(function () {
  if (window.__lmsNavigationHook) { return; }
  window.__lmsNavigationHook = true;
  var lastHref = location.href;
  function report() {
    if (location.href === lastHref) { return; }
    lastHref = location.href;
    var internals = window.__TAURI_INTERNALS__;
    if (!internals || typeof internals.invoke !== 'function') { return; }
    internals.invoke('surface_in_page_navigated', { url: lastHref }).catch(function () {});
  }
  ['pushState', 'replaceState'].forEach(function (name) {
    var original = history[name];
    history[name] = function () {
      var result = original.apply(this, arguments);
      setTimeout(report, 0);
      return result;
    };
  });
  window.addEventListener('popstate', report);
  window.addEventListener('hashchange', report);
})();"#;
