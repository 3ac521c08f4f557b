//! Test fixtures for vCard parsing and round-trips.

/// Minimal vCard 4.0.
pub const VCARD_MINIMAL: &str = "\
BEGIN:VCARD\r\n\
VERSION:4.0\r\n\
FN:John Doe\r\n\
END:VCARD\r\n";

/// A 2.1 card using nameless parameters, quoted-printable, base64 and a
/// nested AGENT.
pub const VCARD_21_FULL: &str = "\
BEGIN:VCARD\r\n\
VERSION:2.1\r\n\
N:Doe;John;;;\r\n\
FN:John Doe\r\n\
ORG:Example Corp;Engineering\r\n\
TITLE:Engineer\r\n\
TEL;WORK;VOICE:+1-555-0100\r\n\
EMAIL;INTERNET:john@example.com\r\n\
ADR;HOME:;;123 Main St;Austin;TX;78701;USA\r\n\
LABEL;HOME;ENCODING=QUOTED-PRINTABLE:123 Main St.=0D=0AAustin, TX =\r\n\
78701\r\n\
NOTE;QUOTED-PRINTABLE;CHARSET=ISO-8859-1:K=F6ln\r\n\
BDAY:19800322\r\n\
REV:20240115T103000Z\r\n\
GEO:37.386013,-122.082932\r\n\
TZ:-05:00\r\n\
MAILER:PigeonMail 2.1\r\n\
PHOTO;ENCODING=BASE64;TYPE=PNG:iVBORw0KGgo=\r\n\
AGENT:\r\n\
BEGIN:VCARD\r\n\
VERSION:2.1\r\n\
FN:Jane Assistant\r\n\
TEL:+1-555-0101\r\n\
END:VCARD\r\n\
X-CUSTOM;X-FLAG:keep\\, as is\r\n\
END:VCARD\r\n";

/// A 3.0 card with typed parameter lists, escapes and an escaped AGENT.
pub const VCARD_30_FULL: &str = "\
BEGIN:VCARD\r\n\
VERSION:3.0\r\n\
N:Public;John;Quinlan,Q.;Mr.;Esq.\r\n\
FN:Mr. John Q. Public\\, Esq.\r\n\
NICKNAME:Johnny,JQ\r\n\
ORG:ABC\\, Inc.;North American Division;Marketing\r\n\
TEL;TYPE=work,voice:+1-555-0100\r\n\
item1.EMAIL;TYPE=internet,pref:jqpublic@example.com\r\n\
item1.X-ABLabel:Work\r\n\
ADR;TYPE=dom,home,postal,parcel:;;123 Main Street;Any Town;CA;91921-1234;\r\n\
CATEGORIES:friends,work\r\n\
NOTE:Line one\\nLine two\\, with comma\\; and semicolon\r\n\
BDAY:1980-03-22\r\n\
REV:2024-01-15T10:30:00Z\r\n\
GEO:37.386013;-122.082932\r\n\
TZ:-05:00\r\n\
SORT-STRING:Public\r\n\
CLASS:PUBLIC\r\n\
URL:http://www.example.com/~jqpublic\r\n\
PHOTO;ENCODING=b;TYPE=JPEG:iVBORw0KGgo=\r\n\
AGENT:BEGIN:VCARD\\nVERSION:3.0\\nFN:Jane Assistant\\nEND:VCARD\\n\r\n\
END:VCARD\r\n";

/// A 4.0 card with URI-valued and 4.0-only properties.
pub const VCARD_40_FULL: &str = "\
BEGIN:VCARD\r\n\
VERSION:4.0\r\n\
KIND:individual\r\n\
FN:Jane Doe\r\n\
N:Doe;Jane;;Dr.;\r\n\
GENDER:F;she/her\r\n\
LANG;PREF=1:en-US\r\n\
BDAY;VALUE=text:circa 1800\r\n\
ANNIVERSARY:19960415\r\n\
TEL;VALUE=uri;TYPE=cell:tel:+1-555-0100\r\n\
EMAIL;TYPE=work:jane@example.com\r\n\
IMPP;PREF=1:xmpp:jane@example.com\r\n\
ADR;TYPE=work:;;1 Infinite Loop;Cupertino;CA;95014;USA\r\n\
GEO:geo:37.386013,-122.082932\r\n\
TZ:America/New_York\r\n\
NOTE;LANGUAGE=en:Hello\\, world\r\n\
PHOTO:data:image/png;base64,iVBORw0KGgo=\r\n\
CATEGORIES:travel,food\r\n\
REV:20240115T103000Z\r\n\
UID:urn:uuid:f81d4fae-7dec-11d0-a765-00a0c91e6bf6\r\n\
X-SOCIAL;TYPE=twitter:@janedoe\r\n\
END:VCARD\r\n";

/// Two cards back to back, LF line endings.
pub const VCARD_MULTIPLE: &str = "\
BEGIN:VCARD\n\
VERSION:3.0\n\
FN:First Card\n\
END:VCARD\n\
BEGIN:VCARD\n\
VERSION:3.0\n\
FN:Second Card\n\
END:VCARD\n";
