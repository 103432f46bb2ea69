//! Colombian department and city aliases, keyed on lowercase text.

pub(super) const DEPARTMENT_ALIASES: &[(&str, &str)] = &[
    ("bogota", "BOGOTÁ D.C."),
    ("bogotá", "BOGOTÁ D.C."),
    ("bogota d.c.", "BOGOTÁ D.C."),
    ("bogotá d.c.", "BOGOTÁ D.C."),
    ("cundinamarca", "CUNDINAMARCA"),
    ("antioquia", "ANTIOQUIA"),
    ("medellin", "ANTIOQUIA"),
    ("medellín", "ANTIOQUIA"),
    ("atlantico", "ATLÁNTICO"),
    ("atlántico", "ATLÁNTICO"),
    ("bolivar", "BOLÍVAR"),
    ("bolívar", "BOLÍVAR"),
    ("boyaca", "BOYACÁ"),
    ("boyacá", "BOYACÁ"),
    ("caldas", "CALDAS"),
    ("caqueta", "CAQUETÁ"),
    ("caquetá", "CAQUETÁ"),
    ("cauca", "CAUCA"),
    ("cesar", "CESAR"),
    ("choco", "CHOCÓ"),
    ("chocó", "CHOCÓ"),
    ("cordoba", "CÓRDOBA"),
    ("córdoba", "CÓRDOBA"),
    ("guainia", "GUAINÍA"),
    ("guainía", "GUAINÍA"),
    ("guaviare", "GUAVIARE"),
    ("huila", "HUILA"),
    ("la guajira", "LA GUAJIRA"),
    ("guajira", "LA GUAJIRA"),
    ("magdalena", "MAGDALENA"),
    ("meta", "META"),
    ("narino", "NARIÑO"),
    ("nariño", "NARIÑO"),
    ("norte de santander", "NORTE DE SANTANDER"),
    ("putumayo", "PUTUMAYO"),
    ("quindio", "QUINDÍO"),
    ("quindío", "QUINDÍO"),
    ("risaralda", "RISARALDA"),
    ("san andres", "SAN ANDRÉS Y PROVIDENCIA"),
    ("san andrés", "SAN ANDRÉS Y PROVIDENCIA"),
    ("santander", "SANTANDER"),
    ("sucre", "SUCRE"),
    ("tolima", "TOLIMA"),
    ("valle", "VALLE DEL CAUCA"),
    ("valle del cauca", "VALLE DEL CAUCA"),
    ("vaupes", "VAUPÉS"),
    ("vaupés", "VAUPÉS"),
    ("vichada", "VICHADA"),
    ("amazonas", "AMAZONAS"),
    ("arauca", "ARAUCA"),
    ("casanare", "CASANARE"),
];

/// City alias to `(department, municipality)`.
pub(super) const CITY_ALIASES: &[(&str, (&str, &str))] = &[
    ("bogota", ("BOGOTÁ D.C.", "BOGOTÁ D.C.")),
    ("bogotá", ("BOGOTÁ D.C.", "BOGOTÁ D.C.")),
    ("medellin", ("ANTIOQUIA", "MEDELLÍN")),
    ("medellín", ("ANTIOQUIA", "MEDELLÍN")),
    ("cali", ("VALLE DEL CAUCA", "CALI")),
    ("barranquilla", ("ATLÁNTICO", "BARRANQUILLA")),
    ("cartagena", ("BOLÍVAR", "CARTAGENA DE INDIAS")),
    ("bucaramanga", ("SANTANDER", "BUCARAMANGA")),
    ("pereira", ("RISARALDA", "PEREIRA")),
    ("manizales", ("CALDAS", "MANIZALES")),
    ("armenia", ("QUINDÍO", "ARMENIA")),
    ("ibague", ("TOLIMA", "IBAGUÉ")),
    ("ibagué", ("TOLIMA", "IBAGUÉ")),
    ("neiva", ("HUILA", "NEIVA")),
    ("pasto", ("NARIÑO", "PASTO")),
    ("popayan", ("CAUCA", "POPAYÁN")),
    ("popayán", ("CAUCA", "POPAYÁN")),
    ("villavicencio", ("META", "VILLAVICENCIO")),
    ("tunja", ("BOYACÁ", "TUNJA")),
    ("monteria", ("CÓRDOBA", "MONTERÍA")),
    ("montería", ("CÓRDOBA", "MONTERÍA")),
    ("santa marta", ("MAGDALENA", "SANTA MARTA")),
    ("cucuta", ("NORTE DE SANTANDER", "CÚCUTA")),
    ("cúcuta", ("NORTE DE SANTANDER", "CÚCUTA")),
    ("valledupar", ("CESAR", "VALLEDUPAR")),
    ("sincelejo", ("SUCRE", "SINCELEJO")),
    ("riohacha", ("LA GUAJIRA", "RIOHACHA")),
    ("quibdo", ("CHOCÓ", "QUIBDÓ")),
    ("quibdó", ("CHOCÓ", "QUIBDÓ")),
    ("florencia", ("CAQUETÁ", "FLORENCIA")),
    ("mocoa", ("PUTUMAYO", "MOCOA")),
    ("leticia", ("AMAZONAS", "LETICIA")),
    ("yopal", ("CASANARE", "YOPAL")),
    ("arauca", ("ARAUCA", "ARAUCA")),
    ("san jacinto", ("BOLÍVAR", "SAN JACINTO")),
    ("raquira", ("BOYACÁ", "RÁQUIRA")),
    ("ráquira", ("BOYACÁ", "RÁQUIRA")),
    ("la chamba", ("TOLIMA", "GUAMO")),
    ("guamo", ("TOLIMA", "GUAMO")),
    ("sampues", ("SUCRE", "SAMPUÉS")),
    ("sampués", ("SUCRE", "SAMPUÉS")),
    ("mompos", ("BOLÍVAR", "SANTA CRUZ DE MOMPOX")),
    ("mompox", ("BOLÍVAR", "SANTA CRUZ DE MOMPOX")),
    ("barichara", ("SANTANDER", "BARICHARA")),
    ("guatape", ("ANTIOQUIA", "GUATAPÉ")),
    ("guatapé", ("ANTIOQUIA", "GUATAPÉ")),
    ("salento", ("QUINDÍO", "SALENTO")),
    ("silvia", ("CAUCA", "SILVIA")),
    ("nobsa", ("BOYACÁ", "NOBSA")),
    ("filandia", ("QUINDÍO", "FILANDIA")),
    ("zipaquira", ("CUNDINAMARCA", "ZIPAQUIRÁ")),
    ("zipaquirá", ("CUNDINAMARCA", "ZIPAQUIRÁ")),
    ("villa de leyva", ("BOYACÁ", "VILLA DE LEYVA")),
];
